use std::fmt;

use bitflags::bitflags;

/// Semantic "enter key" behavior of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImeAction {
    Search,
    Send,
    Done,
    Next,
    Go,
}

impl ImeAction {
    /// Editor action id understood by the platform's input method framework.
    pub fn editor_action_id(self) -> u32 {
        match self {
            ImeAction::Go => 2,
            ImeAction::Search => 3,
            ImeAction::Send => 4,
            ImeAction::Next => 5,
            ImeAction::Done => 6,
        }
    }

    pub fn from_editor_action_id(id: u32) -> Option<Self> {
        match id {
            2 => Some(ImeAction::Go),
            3 => Some(ImeAction::Search),
            4 => Some(ImeAction::Send),
            5 => Some(ImeAction::Next),
            6 => Some(ImeAction::Done),
            _ => None,
        }
    }

    /// Whether a successful submit of this kind ends the editing session.
    pub fn closes_surface(self) -> bool {
        matches!(self, ImeAction::Search | ImeAction::Send | ImeAction::Go)
    }
}

impl fmt::Display for ImeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImeAction::Search => "search",
            ImeAction::Send => "send",
            ImeAction::Done => "done",
            ImeAction::Next => "next",
            ImeAction::Go => "go",
        };
        f.write_str(s)
    }
}

bitflags! {
    /// Editor options handed to the floating surface's input control.
    /// The low byte carries the editor action id.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ImeOptions: u32 {
        const ACTION_MASK = 0x0000_00ff;
        const NO_FULLSCREEN = 0x0200_0000;
        const NO_EXTRACT_UI = 0x1000_0000;
    }
}

impl ImeOptions {
    /// Options for the surface: the action plus no extract UI, so the
    /// keyboard never covers the surface with a fullscreen editor.
    pub fn for_action(action: ImeAction) -> Self {
        ImeOptions::from_bits_retain(action.editor_action_id()) | ImeOptions::NO_EXTRACT_UI
    }

    pub fn action(self) -> Option<ImeAction> {
        ImeAction::from_editor_action_id(self.bits() & ImeOptions::ACTION_MASK.bits())
    }
}

/// Keyword groups in priority order; the first group with a hit wins.
/// Each concept carries Chinese and English terms.
pub const ACTION_KEYWORDS: &[(ImeAction, &[&str])] = &[
    (ImeAction::Search, &["搜索", "查找", "search"]),
    (ImeAction::Send, &["发送", "提交", "send", "submit"]),
    (ImeAction::Done, &["完成", "done"]),
    (ImeAction::Next, &["下一个", "下一步", "next"]),
    (ImeAction::Go, &["前往", "跳转", "go"]),
];

/// Guess the submit action of a field from its hint, text, and content
/// description. Falls back to `Done`.
pub fn infer_action(
    hint: Option<&str>,
    text: Option<&str>,
    content_description: Option<&str>,
) -> ImeAction {
    let fields = [
        hint.unwrap_or("").to_lowercase(),
        text.unwrap_or("").to_lowercase(),
        content_description.unwrap_or("").to_lowercase(),
    ];

    ACTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            fields
                .iter()
                .any(|field| keywords.iter().any(|k| field.contains(k)))
        })
        .map(|(action, _)| *action)
        .unwrap_or(ImeAction::Done)
}
