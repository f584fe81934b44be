//! Host environment events and listener registration.

pub(crate) mod events;
