//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のバンドルを提供します。
#![cfg(test)]

use std::collections::HashMap;

use crate::input::tree::{
    BundleTree,
    BundleTreeSet,
};
use crate::types::{
    LocalizedValue,
    display_arg,
};

/// ルートスコープ用のバンドル（"en" と "other"）
pub(crate) fn root_languages() -> BundleTreeSet {
    let en = BundleTree::new()
        .with("hello", "Hello.1")
        .with("role", "Role.1")
        .with(
            "args",
            LocalizedValue::generator(|args| {
                let arg = |i: usize| args.get(i).map(display_arg).unwrap_or_default();
                format!("Has {} and {}", arg(0), arg(1))
            }),
        )
        .with("bold", "Some **bold** text");
    let other = BundleTree::new().with("hello", "Hello.2").with("role", "Role.2");

    HashMap::from([("en".to_string(), en), ("other".to_string(), other)])
}

/// ネストしたスコープ用のバンドル（"hello" のみ上書き）
pub(crate) fn nested_languages() -> BundleTreeSet {
    HashMap::from([
        ("en".to_string(), BundleTree::new().with("hello", "Hello.nested.1")),
        ("other".to_string(), BundleTree::new().with("hello", "Hello.nested.2")),
    ])
}
