use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};

/// CLDR 根语言排序规则，默认三级强度，标点不可忽略
static COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| tracing::error!(%e, "failed to load collation data"))
        .ok()
});

/// 按语言习惯比较两个标题
///
/// 使用 Unicode 排序算法（CLDR 根规则）：先比较基本字符，再比较重音，最后比较大小写（小写在前）。
/// 规则认为相等的标题再按码点比较，保证结果确定。
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let collated = match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => Ordering::Equal,
    };

    collated.then_with(|| a.cmp(b))
}
