mod build;
mod interaction;
mod view;

pub(super) use interaction::HoverTarget;
