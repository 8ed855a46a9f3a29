//! Typed view of the server-rendered page: element references, patch
//! descriptions, and the shape of a delegated click.

use std::collections::HashMap;
use std::fmt;

use shared::domain::{PostId, Username};

pub const EDIT_BTN_CLASS: &str = "edit-btn";
pub const CANCEL_BTN_CLASS: &str = "cancel-btn";
pub const SAVE_BTN_CLASS: &str = "save-btn";
pub const LIKE_BTN_CLASS: &str = "like-btn";
pub const FOLLOW_BTN_CLASS: &str = "follow-btn";

/// Addressable elements of the template contract. `selector()` renders the
/// exact id/selector the templates emit for each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    PostContent(PostId),
    PostEditForm(PostId),
    EditTextarea(PostId),
    EditButton(PostId),
    SaveButton(PostId),
    LikeButton(PostId),
    LikeCount(PostId),
    FollowButton(Username),
    FollowLabel(Username),
    FollowerCountValue,
}

impl ElementRef {
    pub fn selector(&self) -> String {
        match self {
            Self::PostContent(post) => format!("#post-content-{post}"),
            Self::PostEditForm(post) => format!("#post-edit-{post}"),
            Self::EditTextarea(post) => format!("#edit-content-{post}"),
            Self::EditButton(post) => format!(".edit-btn[data-post-id=\"{post}\"]"),
            Self::SaveButton(post) => format!(".save-btn[data-post-id=\"{post}\"]"),
            Self::LikeButton(post) => format!(".like-btn[data-post-id=\"{post}\"]"),
            Self::LikeCount(post) => format!(".like-btn[data-post-id=\"{post}\"] .like-count"),
            Self::FollowButton(user) => format!(".follow-btn[data-username=\"{user}\"]"),
            Self::FollowLabel(user) => format!(".follow-btn[data-username=\"{user}\"] .follow-text"),
            Self::FollowerCountValue => ".follower-count-value".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssClass {
    BtnSuccess,
    BtnOutlineSecondary,
    BtnDanger,
    BtnOutlineDanger,
    BtnPrimary,
    BtnOutlinePrimary,
}

impl CssClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BtnSuccess => "btn-success",
            Self::BtnOutlineSecondary => "btn-outline-secondary",
            Self::BtnDanger => "btn-danger",
            Self::BtnOutlineDanger => "btn-outline-danger",
            Self::BtnPrimary => "btn-primary",
            Self::BtnOutlinePrimary => "btn-outline-primary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Block,
    InlineBlock,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::InlineBlock => "inline-block",
        }
    }
}

/// One page mutation. Patches are order-significant within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomPatch {
    Show { target: ElementRef, mode: DisplayMode },
    Hide { target: ElementRef },
    SetText { target: ElementRef, text: String },
    AddClass { target: ElementRef, class: CssClass },
    RemoveClass { target: ElementRef, class: CssClass },
    SetDisabled { target: ElementRef, disabled: bool },
}

impl fmt::Display for DomPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show { target, mode } => {
                write!(f, "show {} ({})", target.selector(), mode.as_str())
            }
            Self::Hide { target } => write!(f, "hide {}", target.selector()),
            Self::SetText { target, text } => {
                write!(f, "set-text {} {text:?}", target.selector())
            }
            Self::AddClass { target, class } => {
                write!(f, "add-class {} {}", target.selector(), class.as_str())
            }
            Self::RemoveClass { target, class } => {
                write!(f, "remove-class {} {}", target.selector(), class.as_str())
            }
            Self::SetDisabled { target, disabled } => {
                write!(f, "set-disabled {} {disabled}", target.selector())
            }
        }
    }
}

/// A DOM element as the delegated listener sees it: its classes and its
/// `data-*` attributes, still unparsed.
#[derive(Debug, Clone, Default)]
pub struct ElementDesc {
    pub classes: Vec<String>,
    pub dataset: HashMap<String, String>,
}

impl ElementDesc {
    pub fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            dataset: HashMap::new(),
        }
    }

    pub fn data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.dataset.insert(key.to_string(), value.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

/// The originating element of a delegated click plus its ancestor chain,
/// nearest ancestor first.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub element: ElementDesc,
    pub ancestors: Vec<ElementDesc>,
}

impl ClickTarget {
    pub fn on(element: ElementDesc) -> Self {
        Self {
            element,
            ancestors: Vec::new(),
        }
    }

    pub fn nested(element: ElementDesc, ancestors: Vec<ElementDesc>) -> Self {
        Self { element, ancestors }
    }

    /// Nearest ancestor-or-self carrying the given class, mirroring
    /// `Element::closest` on the page.
    pub fn closest(&self, class: &str) -> Option<&ElementDesc> {
        if self.element.has_class(class) {
            return Some(&self.element);
        }
        self.ancestors.iter().find(|el| el.has_class(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_render_the_template_contract() {
        assert_eq!(
            ElementRef::PostContent(PostId(7)).selector(),
            "#post-content-7"
        );
        assert_eq!(
            ElementRef::EditButton(PostId(7)).selector(),
            ".edit-btn[data-post-id=\"7\"]"
        );
        assert_eq!(
            ElementRef::LikeCount(PostId(7)).selector(),
            ".like-btn[data-post-id=\"7\"] .like-count"
        );
        assert_eq!(
            ElementRef::FollowLabel(Username::new("alice")).selector(),
            ".follow-btn[data-username=\"alice\"] .follow-text"
        );
        assert_eq!(
            ElementRef::FollowerCountValue.selector(),
            ".follower-count-value"
        );
    }

    #[test]
    fn closest_prefers_self_over_ancestors() {
        let click = ClickTarget::nested(
            ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", "1"),
            vec![ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", "2")],
        );
        let button = click.closest(LIKE_BTN_CLASS).expect("match");
        assert_eq!(button.attr("post-id"), Some("1"));
    }

    #[test]
    fn closest_walks_the_ancestor_chain_in_order() {
        let click = ClickTarget::nested(
            ElementDesc::with_class("bi-heart"),
            vec![
                ElementDesc::with_class("btn-text"),
                ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", "3"),
            ],
        );
        let button = click.closest(LIKE_BTN_CLASS).expect("match");
        assert_eq!(button.attr("post-id"), Some("3"));
        assert!(click.closest(FOLLOW_BTN_CLASS).is_none());
    }
}
