use crate::SpecialTag;

/// Reserved-use keyword; the earliest entry of [`SpecialTag::PRIORITY`] present wins.
pub fn special_use() -> crate::Pass {
    pass! {
        name: "special use",
        run: |text, draft| {
            draft.special_tag = SpecialTag::PRIORITY.iter().find(|(keyword, _)| text.contains(keyword)).map(|(_, tag)| *tag);
            usize::from(draft.special_tag.is_some())
        }
    }
}
