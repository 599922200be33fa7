#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Pass`](crate::Pass). `buckets` defaults to none (always active).
macro_rules! pass {
    (
        name: $name:expr
        $(, buckets: $buckets:expr)?
        , run: |$text:ident, $draft:ident| $body:block
        $(,)?
    ) => {{
        $crate::Pass {
            name: $name,
            buckets: { $crate::engine::TriggerMask::empty() $(| $buckets)? },
            run: |$text: &str, $draft: &mut $crate::RuleDraft| -> usize { $body },
        }
    }};
}
