// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn codes_have_expected_values() {
    assert_eq!(codes::KEY, 74);
    assert_eq!(codes::COMMENT, 240);
    assert_eq!(codes::CONTEXT, 245);
}

#[test]
fn colored_palette_wraps_in_ansi() {
    let palette = Palette { colorize: true };
    let result = palette.key("PRUNEFS");
    assert!(result.starts_with("\x1b[38;5;74m"), "{result:?}");
    assert!(result.contains("PRUNEFS"));
    assert!(result.ends_with("\x1b[0m"));
    assert!(palette.comment("# x").starts_with("\x1b[38;5;240m"));
}

#[test]
fn plain_palette_leaves_text_alone() {
    let palette = Palette::plain();
    assert_eq!(palette.key("K"), "K");
    assert_eq!(palette.comment("# c"), "# c");
    assert_eq!(palette.context("3"), "3");
}
