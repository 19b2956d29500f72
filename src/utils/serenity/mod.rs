pub mod buttons;
pub mod channel;
pub mod component_interaction;
