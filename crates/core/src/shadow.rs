//! Drag shadow - the landing indicator shown while a block is being dragged.
//!
//! The game only stores this state; the drag collaborator computes it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShadowState {
    /// Width of the dragged block in cells
    pub columns: u8,
    /// Left edge column the block would land at
    pub position: u8,
    pub visible: bool,
}

impl Default for ShadowState {
    fn default() -> Self {
        Self {
            columns: 1,
            position: 0,
            visible: false,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowUpdate {
    pub columns: Option<u8>,
    pub position: Option<u8>,
    pub visible: Option<bool>,
}

impl ShadowUpdate {
    pub fn show(columns: u8, position: u8) -> Self {
        Self {
            columns: Some(columns),
            position: Some(position),
            visible: Some(true),
        }
    }

    pub fn hide() -> Self {
        Self {
            visible: Some(false),
            ..Self::default()
        }
    }

    pub fn position(position: u8) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }
}

impl ShadowState {
    pub fn merge(&mut self, update: ShadowUpdate) {
        if let Some(columns) = update.columns {
            self.columns = columns;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(visible) = update.visible {
            self.visible = visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut shadow = ShadowState::default();
        shadow.merge(ShadowUpdate::show(3, 2));
        assert_eq!(
            shadow,
            ShadowState {
                columns: 3,
                position: 2,
                visible: true
            }
        );

        shadow.merge(ShadowUpdate::position(4));
        assert_eq!(shadow.columns, 3);
        assert_eq!(shadow.position, 4);
        assert!(shadow.visible);

        shadow.merge(ShadowUpdate::hide());
        assert!(!shadow.visible);
        assert_eq!(shadow.position, 4);
    }
}
