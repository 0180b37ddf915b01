// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property definition flags.

bitflags::bitflags! {
    /// Behavioral flags attached to a property definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// Settable on any element, not only on subtypes of the owner.
        const ATTACHED       = 0b0000_0001;
        /// Changes schedule a deferred re-layout of the element.
        const AFFECTS_LAYOUT = 0b0000_0010;
        /// Changes schedule a deferred repaint of the element.
        const AFFECTS_RENDER = 0b0000_0100;
        /// The owner type's content node: nested declarations land here.
        const CONTENT        = 0b0000_1000;
    }
}
