// Copyright 2025 the UXML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use uxml_element::{ElementId, ElementTree};

/// Resolves a named part of `control`.
///
/// `None` means the control itself. A name is looked up under the control's
/// chrome root first, then in the control's own subtree.
pub(crate) fn resolve(tree: &ElementTree, control: ElementId, name: Option<&str>) -> Option<ElementId> {
    let Some(name) = name else {
        return tree.is_alive(control).then_some(control);
    };
    tree.chrome(control)
        .and_then(|chrome| tree.find_name(chrome, name))
        .or_else(|| tree.find_name(control, name))
}
