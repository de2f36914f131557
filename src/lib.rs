//! 固定した整数閉区間の上で, 区間への一様加算と区間和の取得をどちらも
//! O(log N) で行う遅延伝播セグメント木.

mod seg_tree;
mod span;

pub use crate::{seg_tree::SegmentTree, span::Span};
