//! Pure patch planners: per-action page transitions with no I/O.

use shared::domain::{PostId, Username};
use shared::protocol::{FollowState, LikeState};

use crate::dom::{CssClass, DisplayMode, DomPatch, ElementRef};

pub const EDIT_LABEL: &str = "Edit";
pub const SAVED_FLASH_LABEL: &str = "Saved!";
pub const SAVE_LABEL: &str = "Save";
pub const SAVING_LABEL: &str = "Saving...";
pub const FOLLOW_LABEL: &str = "Follow";
pub const UNFOLLOW_LABEL: &str = "Unfollow";

pub fn begin_edit(post: PostId) -> Vec<DomPatch> {
    vec![
        DomPatch::Hide {
            target: ElementRef::PostContent(post),
        },
        DomPatch::Show {
            target: ElementRef::PostEditForm(post),
            mode: DisplayMode::Block,
        },
        DomPatch::Hide {
            target: ElementRef::EditButton(post),
        },
    ]
}

pub fn cancel_edit(post: PostId) -> Vec<DomPatch> {
    vec![
        DomPatch::Show {
            target: ElementRef::PostContent(post),
            mode: DisplayMode::Block,
        },
        DomPatch::Hide {
            target: ElementRef::PostEditForm(post),
        },
        DomPatch::Show {
            target: ElementRef::EditButton(post),
            mode: DisplayMode::InlineBlock,
        },
    ]
}

pub fn save_in_flight(post: PostId) -> Vec<DomPatch> {
    vec![
        DomPatch::SetDisabled {
            target: ElementRef::SaveButton(post),
            disabled: true,
        },
        DomPatch::SetText {
            target: ElementRef::SaveButton(post),
            text: SAVING_LABEL.to_string(),
        },
    ]
}

/// Emitted unconditionally once a save attempt settles, whatever the
/// outcome was.
pub fn save_settled(post: PostId) -> Vec<DomPatch> {
    vec![
        DomPatch::SetDisabled {
            target: ElementRef::SaveButton(post),
            disabled: false,
        },
        DomPatch::SetText {
            target: ElementRef::SaveButton(post),
            text: SAVE_LABEL.to_string(),
        },
    ]
}

pub struct SaveApplied {
    pub patches: Vec<DomPatch>,
    pub flash_revert: Vec<DomPatch>,
}

/// Plan for an accepted edit: swap the post back to its read-only view
/// with the server-echoed content, and flash the edit button, returning
/// the reverting batch to apply once the flash elapses.
pub fn save_applied(post: PostId, content: &str) -> SaveApplied {
    let patches = vec![
        DomPatch::SetText {
            target: ElementRef::PostContent(post),
            text: content.to_string(),
        },
        DomPatch::Show {
            target: ElementRef::PostContent(post),
            mode: DisplayMode::Block,
        },
        DomPatch::Hide {
            target: ElementRef::PostEditForm(post),
        },
        DomPatch::Show {
            target: ElementRef::EditButton(post),
            mode: DisplayMode::InlineBlock,
        },
        DomPatch::SetText {
            target: ElementRef::EditButton(post),
            text: SAVED_FLASH_LABEL.to_string(),
        },
        DomPatch::RemoveClass {
            target: ElementRef::EditButton(post),
            class: CssClass::BtnOutlineSecondary,
        },
        DomPatch::AddClass {
            target: ElementRef::EditButton(post),
            class: CssClass::BtnSuccess,
        },
    ];
    let flash_revert = vec![
        DomPatch::SetText {
            target: ElementRef::EditButton(post),
            text: EDIT_LABEL.to_string(),
        },
        DomPatch::RemoveClass {
            target: ElementRef::EditButton(post),
            class: CssClass::BtnSuccess,
        },
        DomPatch::AddClass {
            target: ElementRef::EditButton(post),
            class: CssClass::BtnOutlineSecondary,
        },
    ];
    SaveApplied {
        patches,
        flash_revert,
    }
}

pub fn like_updated(post: PostId, state: &LikeState) -> Vec<DomPatch> {
    let button = ElementRef::LikeButton(post);
    let mut patches = if state.is_liked {
        vec![
            DomPatch::AddClass {
                target: button.clone(),
                class: CssClass::BtnDanger,
            },
            DomPatch::RemoveClass {
                target: button,
                class: CssClass::BtnOutlineDanger,
            },
        ]
    } else {
        vec![
            DomPatch::AddClass {
                target: button.clone(),
                class: CssClass::BtnOutlineDanger,
            },
            DomPatch::RemoveClass {
                target: button,
                class: CssClass::BtnDanger,
            },
        ]
    };
    patches.push(DomPatch::SetText {
        target: ElementRef::LikeCount(post),
        text: state.like_count.to_string(),
    });
    patches
}

/// The followed state renders as the outline button; the label and the
/// page-global follower counter are optional template elements and only
/// patched when present.
pub fn follow_updated(
    user: &Username,
    state: &FollowState,
    label_present: bool,
    counter_present: bool,
) -> Vec<DomPatch> {
    let button = ElementRef::FollowButton(user.clone());
    let mut patches = if state.is_following {
        vec![
            DomPatch::AddClass {
                target: button.clone(),
                class: CssClass::BtnOutlinePrimary,
            },
            DomPatch::RemoveClass {
                target: button,
                class: CssClass::BtnPrimary,
            },
        ]
    } else {
        vec![
            DomPatch::AddClass {
                target: button.clone(),
                class: CssClass::BtnPrimary,
            },
            DomPatch::RemoveClass {
                target: button,
                class: CssClass::BtnOutlinePrimary,
            },
        ]
    };
    if label_present {
        patches.push(DomPatch::SetText {
            target: ElementRef::FollowLabel(user.clone()),
            text: if state.is_following {
                UNFOLLOW_LABEL.to_string()
            } else {
                FOLLOW_LABEL.to_string()
            },
        });
    }
    if counter_present {
        patches.push(DomPatch::SetText {
            target: ElementRef::FollowerCountValue,
            text: state.follower_count.to_string(),
        });
    }
    patches
}
