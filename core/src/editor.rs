//! The seam to the rich-text editor component.
//!
//! Pages touch the editor in exactly two ways: they read its document as an
//! opaque block sequence when submitting, and they replace the document
//! wholesale after a successful fetch or a successful create.

use crate::types::Block;

pub trait Editor {
    /// Current document, in order.
    fn document(&self) -> Vec<Block>;

    /// Replace the whole document.
    fn replace_document(&mut self, blocks: Vec<Block>);
}

/// In-memory editor document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    replacements: usize,
}

impl BlockDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A local edit: append one block.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// A local edit: set the whole document as if the user typed it.
    /// Unlike `replace_document`, this is not counted as a replacement.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// How many times the document was replaced wholesale.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Editor for BlockDocument {
    fn document(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    fn replace_document(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
        self.replacements += 1;
    }
}
