// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{helper::format_time, types::Transaction, visibility::Viewport};

/// Lines each transaction occupies, separator included.
pub const ROW_HEIGHT: usize = 7;

pub const SENTINEL_HEIGHT: usize = 1;

pub const SENTINEL_TEXT: &str = "  ... scroll for more ...";

/// The list as plain text lines, plus where the sentinel sits if shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedList {
    pub lines: Vec<String>,
    pub sentinel_row: Option<usize>,
}

impl RenderedList {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines inside `viewport`.
    pub fn window(&self, viewport: Viewport) -> &[String] {
        let start = viewport.offset.min(self.lines.len());
        let end = (viewport.offset + viewport.height).min(self.lines.len());
        &self.lines[start..end]
    }
}

fn push_item(lines: &mut Vec<String>, txn: &Transaction) {
    lines.push(format!(" Timestamp: {}", format_time(&txn.timestamp)));
    lines.push(format!(" From: {}", txn.from));
    lines.push(format!(" To: {}", txn.to));
    lines.push(format!(" Value Of Transaction: {}", txn.value));
    lines.push(format!(" Confirmations: {}", txn.confirmations));
    lines.push(format!(" Hash: {}", txn.hash));
    lines.push(String::new());
}

pub fn render_list(records: &[Transaction], has_more: bool) -> RenderedList {
    let mut lines = Vec::with_capacity(records.len() * ROW_HEIGHT + SENTINEL_HEIGHT);
    for txn in records {
        push_item(&mut lines, txn);
    }

    let sentinel_row = if has_more {
        let row = lines.len();
        lines.push(SENTINEL_TEXT.to_string());
        Some(row)
    } else {
        None
    };

    RenderedList {
        lines,
        sentinel_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(hash: &str) -> Transaction {
        Transaction {
            hash: hash.to_string(),
            from: "0xfrom".to_string(),
            to: "0xto".to_string(),
            value: "1000".to_string(),
            confirmations: "12".to_string(),
            timestamp: "not-a-number".to_string(),
            ..Transaction::default()
        }
    }

    #[test]
    fn test_rows_have_fixed_fields() {
        let list = render_list(&[txn("0xaa")], false);
        assert_eq!(list.len(), ROW_HEIGHT);
        assert_eq!(list.lines[0], " Timestamp: Invalid date");
        assert_eq!(list.lines[1], " From: 0xfrom");
        assert_eq!(list.lines[2], " To: 0xto");
        assert_eq!(list.lines[3], " Value Of Transaction: 1000");
        assert_eq!(list.lines[4], " Confirmations: 12");
        assert_eq!(list.lines[5], " Hash: 0xaa");
        assert_eq!(list.sentinel_row, None);
    }

    #[test]
    fn test_sentinel_only_while_has_more() {
        let records: Vec<_> = (0..20).map(|i| txn(&format!("0x{}", i))).collect();
        let list = render_list(&records, true);
        assert_eq!(list.sentinel_row, Some(20 * ROW_HEIGHT));
        assert_eq!(list.len(), 20 * ROW_HEIGHT + SENTINEL_HEIGHT);
        assert_eq!(list.lines.last().map(String::as_str), Some(SENTINEL_TEXT));

        assert_eq!(render_list(&records, false).sentinel_row, None);
        assert_eq!(render_list(&[], true).sentinel_row, Some(0));
        assert!(render_list(&[], false).is_empty());
    }

    #[test]
    fn test_window() {
        let list = render_list(&[txn("0x1"), txn("0x2")], true);
        let window = list.window(Viewport {
            offset: 5,
            height: 4,
        });
        assert_eq!(window.len(), 4);
        assert_eq!(window[0], " Hash: 0x1");
        assert_eq!(window[2], " Timestamp: Invalid date");

        let past_end = list.window(Viewport {
            offset: 100,
            height: 4,
        });
        assert!(past_end.is_empty());
    }
}
