//! Maps a delegated click to the actions it qualifies for.

use shared::domain::{PostId, Username};
use tracing::warn;

use crate::dom::{
    ClickTarget, ElementDesc, CANCEL_BTN_CLASS, EDIT_BTN_CLASS, FOLLOW_BTN_CLASS, LIKE_BTN_CLASS,
    SAVE_BTN_CLASS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BeginEdit(PostId),
    CancelEdit(PostId),
    SubmitEdit(PostId),
    ToggleLike(PostId),
    ToggleFollow(Username),
}

/// A click yields at most one of the mutually exclusive role actions, plus
/// at most one like action resolved through the ancestor chain (icon
/// clicks inside the like button land on a descendant element).
pub fn classify(click: &ClickTarget) -> Vec<Action> {
    let mut actions = Vec::new();
    let element = &click.element;

    if element.has_class(EDIT_BTN_CLASS) {
        if let Some(post) = post_id_of(element) {
            actions.push(Action::BeginEdit(post));
        }
    } else if element.has_class(CANCEL_BTN_CLASS) {
        if let Some(post) = post_id_of(element) {
            actions.push(Action::CancelEdit(post));
        }
    } else if element.has_class(SAVE_BTN_CLASS) {
        if let Some(post) = post_id_of(element) {
            actions.push(Action::SubmitEdit(post));
        }
    } else if element.has_class(FOLLOW_BTN_CLASS) {
        if let Some(user) = username_of(element) {
            actions.push(Action::ToggleFollow(user));
        }
    }

    if let Some(button) = click.closest(LIKE_BTN_CLASS) {
        if let Some(post) = post_id_of(button) {
            actions.push(Action::ToggleLike(post));
        }
    }

    actions
}

fn post_id_of(element: &ElementDesc) -> Option<PostId> {
    let Some(raw) = element.attr("post-id") else {
        warn!("clicked element carries no data-post-id attribute");
        return None;
    };
    match raw.parse::<i64>() {
        Ok(id) => Some(PostId(id)),
        Err(_) => {
            warn!(raw, "ignoring click with non-numeric data-post-id");
            None
        }
    }
}

fn username_of(element: &ElementDesc) -> Option<Username> {
    let Some(raw) = element.attr("username") else {
        warn!("clicked element carries no data-username attribute");
        return None;
    };
    if raw.is_empty() {
        warn!("ignoring click with empty data-username");
        return None;
    }
    Some(Username::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementDesc;

    #[test]
    fn role_buttons_classify_to_their_actions() {
        let cases = [
            (EDIT_BTN_CLASS, Action::BeginEdit(PostId(4))),
            (CANCEL_BTN_CLASS, Action::CancelEdit(PostId(4))),
            (SAVE_BTN_CLASS, Action::SubmitEdit(PostId(4))),
        ];
        for (class, expected) in cases {
            let click = ClickTarget::on(ElementDesc::with_class(class).data("post-id", "4"));
            assert_eq!(classify(&click), vec![expected]);
        }
    }

    #[test]
    fn follow_button_resolves_username() {
        let click =
            ClickTarget::on(ElementDesc::with_class(FOLLOW_BTN_CLASS).data("username", "bob"));
        assert_eq!(
            classify(&click),
            vec![Action::ToggleFollow(Username::new("bob"))]
        );
    }

    #[test]
    fn role_checks_are_mutually_exclusive() {
        let mut element = ElementDesc::with_class(EDIT_BTN_CLASS).data("post-id", "9");
        element.classes.push(CANCEL_BTN_CLASS.to_string());
        let click = ClickTarget::on(element);
        assert_eq!(classify(&click), vec![Action::BeginEdit(PostId(9))]);
    }

    #[test]
    fn like_check_runs_independently_of_role_checks() {
        let click = ClickTarget::nested(
            ElementDesc::with_class(SAVE_BTN_CLASS).data("post-id", "2"),
            vec![ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", "2")],
        );
        assert_eq!(
            classify(&click),
            vec![Action::SubmitEdit(PostId(2)), Action::ToggleLike(PostId(2))]
        );
    }

    #[test]
    fn icon_click_inside_like_button_resolves_to_the_button() {
        let click = ClickTarget::nested(
            ElementDesc::with_class("bi-heart-fill"),
            vec![ElementDesc::with_class(LIKE_BTN_CLASS).data("post-id", "12")],
        );
        assert_eq!(classify(&click), vec![Action::ToggleLike(PostId(12))]);
    }

    #[test]
    fn garbled_or_missing_identifiers_classify_to_nothing() {
        let garbled =
            ClickTarget::on(ElementDesc::with_class(EDIT_BTN_CLASS).data("post-id", "not-a-number"));
        assert!(classify(&garbled).is_empty());

        let missing = ClickTarget::on(ElementDesc::with_class(SAVE_BTN_CLASS));
        assert!(classify(&missing).is_empty());

        let anonymous = ClickTarget::on(ElementDesc::with_class(FOLLOW_BTN_CLASS));
        assert!(classify(&anonymous).is_empty());
    }

    #[test]
    fn unrelated_clicks_classify_to_nothing() {
        let click = ClickTarget::on(ElementDesc::with_class("nav-link"));
        assert!(classify(&click).is_empty());
    }
}
