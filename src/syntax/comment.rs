//! The DocComment root aggregate
//!
//! Assembly order is the order blocks were encountered by the parser.
//! Singleton blocks (returns, remarks, deprecated) keep their first
//! occurrence; the parameter collection keeps duplicates in its ordered list
//! but resolves name lookups to the first-added block; modifier tags are a
//! deduplicated, insertion-ordered set.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::nodes::{DocBlock, DocBlockTag, DocParamBlock, DocSection};

/// Ordered collection of `@param` blocks with a by-name index
///
/// The name index is built as blocks are inserted; the first-added block for
/// a given name wins on lookup, while later duplicates remain present in the
/// ordered list.
#[derive(Debug, Clone, Default)]
pub struct DocParamCollection {
    blocks: Vec<DocParamBlock>,
    by_name: FxHashMap<SmolStr, usize>,
}

impl DocParamCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter block, keeping insertion order
    pub fn add(&mut self, block: DocParamBlock) {
        let name = SmolStr::new(block.parameter_name());
        let index = self.blocks.len();
        self.blocks.push(block);
        self.by_name.entry(name).or_insert(index);
    }

    /// The first-added block with this parameter name, O(1)
    pub fn try_get_block_by_name(&self, parameter_name: &str) -> Option<&DocParamBlock> {
        self.by_name
            .get(parameter_name)
            .map(|&index| &self.blocks[index])
    }

    /// All blocks in insertion order, duplicates included
    pub fn blocks(&self) -> &[DocParamBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocParamBlock> {
        self.blocks.iter()
    }
}

/// Insertion-ordered set of modifier tags with duplicate suppression
#[derive(Debug, Clone, Default)]
pub struct ModifierTagSet {
    tags: IndexMap<SmolStr, DocBlockTag>,
}

impl ModifierTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a modifier tag; returns `false` when a tag with the same
    /// (case-insensitive) name was already present
    pub fn add(&mut self, tag: DocBlockTag) -> bool {
        let key = tag.normalized_name();
        if self.tags.contains_key(&key) {
            return false;
        }
        self.tags.insert(key, tag);
        true
    }

    /// Check membership by tag name (with or without duplicated case)
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Tags in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DocBlockTag> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// The root of a parsed (or constructed) documentation comment
#[derive(Debug, Clone, Default)]
pub struct DocComment {
    summary: DocSection,
    params: DocParamCollection,
    returns_block: Option<Box<DocBlock>>,
    remarks_block: Option<Box<DocBlock>>,
    deprecated_block: Option<Box<DocBlock>>,
    see_blocks: Vec<DocBlock>,
    custom_blocks: Vec<DocBlock>,
    modifier_tags: ModifierTagSet,
}

impl DocComment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The content before the first block tag
    pub fn summary_section(&self) -> &DocSection {
        &self.summary
    }

    pub fn set_summary_section(&mut self, section: DocSection) {
        self.summary = section;
    }

    pub fn params(&self) -> &DocParamCollection {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut DocParamCollection {
        &mut self.params
    }

    pub fn returns_block(&self) -> Option<&DocBlock> {
        self.returns_block.as_deref()
    }

    /// Set the returns block; the first one wins and later calls are
    /// ignored, returning `false`
    pub fn try_set_returns_block(&mut self, block: DocBlock) -> bool {
        if self.returns_block.is_some() {
            return false;
        }
        self.returns_block = Some(Box::new(block));
        true
    }

    pub fn remarks_block(&self) -> Option<&DocBlock> {
        self.remarks_block.as_deref()
    }

    pub fn try_set_remarks_block(&mut self, block: DocBlock) -> bool {
        if self.remarks_block.is_some() {
            return false;
        }
        self.remarks_block = Some(Box::new(block));
        true
    }

    pub fn deprecated_block(&self) -> Option<&DocBlock> {
        self.deprecated_block.as_deref()
    }

    pub fn try_set_deprecated_block(&mut self, block: DocBlock) -> bool {
        if self.deprecated_block.is_some() {
            return false;
        }
        self.deprecated_block = Some(Box::new(block));
        true
    }

    pub fn see_blocks(&self) -> &[DocBlock] {
        &self.see_blocks
    }

    pub fn add_see_block(&mut self, block: DocBlock) {
        self.see_blocks.push(block);
    }

    /// Blocks for repeatable or unrecognized tags, in encounter order
    pub fn custom_blocks(&self) -> &[DocBlock] {
        &self.custom_blocks
    }

    pub fn add_custom_block(&mut self, block: DocBlock) {
        self.custom_blocks.push(block);
    }

    pub fn modifier_tags(&self) -> &ModifierTagSet {
        &self.modifier_tags
    }

    pub fn modifier_tags_mut(&mut self) -> &mut ModifierTagSet {
        &mut self.modifier_tags
    }
}
