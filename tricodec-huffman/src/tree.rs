//! Arena-backed Huffman tree.
//!
//! Nodes live in a `Vec` and refer to their children by index, so building,
//! walking, and rebuilding the tree needs no recursion and no reference
//! counting. Leaves carry exactly one byte value; internal nodes carry only
//! a combined weight.

use crate::code::{BitCode, CodeTable};
use crate::frequency::FrequencyTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tricodec_core::error::{CodecError, Result};

/// Index of a node in the arena.
pub type NodeId = u32;

#[derive(Debug, Clone, Default)]
struct Node {
    weight: u64,
    symbol: Option<u8>,
    /// `[left (0), right (1)]`
    children: [Option<NodeId>; 2],
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.children == [None, None]
    }
}

/// A binary prefix-code tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from byte frequencies.
    ///
    /// The two lightest nodes of the working set are merged repeatedly into
    /// a new internal node whose weight is their sum, until one node, the
    /// root, remains. The first node extracted becomes the left child. Ties
    /// are broken by insertion order: leaves in ascending byte order, then
    /// merged nodes in the order they were created.
    ///
    /// Returns `None` when no symbol occurs.
    pub fn build(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<Node> = frequencies
            .iter()
            .map(|(symbol, weight)| Node {
                weight,
                symbol: Some(symbol),
                children: [None, None],
            })
            .collect();

        // Arena index doubles as the insertion sequence number.
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight, id as NodeId)))
            .collect();

        while heap.len() > 1 {
            let (Some(Reverse((lw, left))), Some(Reverse((rw, right)))) = (heap.pop(), heap.pop())
            else {
                break;
            };
            let weight = lw.saturating_add(rw);
            let id = nodes.len() as NodeId;
            nodes.push(Node {
                weight,
                symbol: None,
                children: [Some(left), Some(right)],
            });
            heap.push(Reverse((weight, id)));
        }

        let Reverse((_, root)) = heap.pop()?;
        Some(Self { nodes, root })
    }

    /// Rebuild a decoding tree from a transmitted code table.
    ///
    /// Each code is inserted as a root-to-leaf path. Fails when a code is
    /// empty, duplicates another code, or is a prefix of another code.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![Node::default()];
        let root: NodeId = 0;

        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(CodecError::invalid_code_table(format!(
                    "symbol {symbol} has an empty code"
                )));
            }

            let mut current = root;
            for bit in code.iter() {
                if let Some(existing) = nodes[current as usize].symbol {
                    return Err(CodecError::invalid_code_table(format!(
                        "code {existing} is a prefix of the code for symbol {symbol}"
                    )));
                }
                let slot = bit as usize;
                current = match nodes[current as usize].children[slot] {
                    Some(child) => child,
                    None => {
                        let child = nodes.len() as NodeId;
                        nodes.push(Node::default());
                        nodes[current as usize].children[slot] = Some(child);
                        child
                    }
                };
            }

            let leaf = &mut nodes[current as usize];
            if leaf.symbol.is_some() || !leaf.is_leaf() {
                return Err(CodecError::invalid_code_table(format!(
                    "code {code} for symbol {symbol} collides with another code"
                )));
            }
            leaf.symbol = Some(symbol);
        }

        Ok(Self { nodes, root })
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Child of `node` along `bit` (`false` = left, `true` = right).
    #[inline]
    pub fn child(&self, node: NodeId, bit: bool) -> Option<NodeId> {
        self.nodes[node as usize].children[bit as usize]
    }

    /// Byte value stored at `node`, if it is a leaf.
    #[inline]
    pub fn symbol(&self, node: NodeId) -> Option<u8> {
        self.nodes[node as usize].symbol
    }

    /// Combined weight of `node` (zero for rebuilt trees).
    pub fn weight(&self, node: NodeId) -> u64 {
        self.nodes[node as usize].weight
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.symbol.is_some()).count()
    }

    /// Derive the code table with an explicit depth-first walk: left edges
    /// append `0`, right edges append `1`. A root that is itself a leaf gets
    /// code `0`.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::new();
        let mut stack = vec![(self.root, BitCode::empty())];

        while let Some((id, code)) = stack.pop() {
            let node = &self.nodes[id as usize];
            if let Some(symbol) = node.symbol {
                let code = if code.is_empty() {
                    BitCode::empty().push(false).unwrap_or(code)
                } else {
                    code
                };
                table.insert(symbol, code);
                continue;
            }

            // Push right first so the left subtree is visited first.
            for (bit, child) in [(true, node.children[1]), (false, node.children[0])] {
                if let Some(child) = child {
                    let extended = code.push(bit).ok_or_else(|| {
                        CodecError::invalid_input(format!(
                            "Huffman code exceeds {} bits",
                            BitCode::MAX_LEN
                        ))
                    })?;
                    stack.push((child, extended));
                }
            }
        }

        Ok(table)
    }
}
