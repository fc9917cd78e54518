use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ControlError, Result};
use crate::models::{
    ClickRequest, HotkeyRequest, KeyRequest, MoveRequest, PointerRequest, ScreenshotRequest,
    ScrollRequest, SleepRequest, TextRequest, TypeRequest, WindowTarget,
};

/// The closed set of action names the dispatcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Click,
    DoubleClick,
    RightClick,
    Move,
    Scroll,
    Type,
    WriteInstant,
    Press,
    Hotkey,
    KeyDown,
    KeyUp,
    Sleep,
    Screenshot,
    Focus,
}

impl ActionKind {
    pub const ALL: [ActionKind; 14] = [
        ActionKind::Click,
        ActionKind::DoubleClick,
        ActionKind::RightClick,
        ActionKind::Move,
        ActionKind::Scroll,
        ActionKind::Type,
        ActionKind::WriteInstant,
        ActionKind::Press,
        ActionKind::Hotkey,
        ActionKind::KeyDown,
        ActionKind::KeyUp,
        ActionKind::Sleep,
        ActionKind::Screenshot,
        ActionKind::Focus,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Click => "click",
            ActionKind::DoubleClick => "double_click",
            ActionKind::RightClick => "right_click",
            ActionKind::Move => "move",
            ActionKind::Scroll => "scroll",
            ActionKind::Type => "type",
            ActionKind::WriteInstant => "write_instant",
            ActionKind::Press => "press",
            ActionKind::Hotkey => "hotkey",
            ActionKind::KeyDown => "key_down",
            ActionKind::KeyUp => "key_up",
            ActionKind::Sleep => "sleep",
            ActionKind::Screenshot => "screenshot",
            ActionKind::Focus => "focus",
        }
    }
}

/// One named operation with its parameters. Consumed by the dispatcher.
#[derive(Debug, Clone)]
pub enum Action {
    Click(ClickRequest),
    DoubleClick(PointerRequest),
    RightClick(PointerRequest),
    Move(MoveRequest),
    Scroll(ScrollRequest),
    Type(TypeRequest),
    WriteInstant(TextRequest),
    Press(KeyRequest),
    Hotkey(HotkeyRequest),
    KeyDown(KeyRequest),
    KeyUp(KeyRequest),
    Sleep(SleepRequest),
    Screenshot(ScreenshotRequest),
    Focus(WindowTarget),
}

impl Action {
    /// Parse a `{"type": "...", ...params}` object. Parameters sit next to
    /// `type` at the top level.
    pub fn parse(value: &Value) -> Result<Self> {
        let name = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ControlError::invalid("Action is missing a string 'type'"))?;
        let kind =
            ActionKind::parse(name).ok_or_else(|| ControlError::UnknownAction(name.to_string()))?;

        Ok(match kind {
            ActionKind::Click => Action::Click(params(kind, value)?),
            ActionKind::DoubleClick => Action::DoubleClick(params(kind, value)?),
            ActionKind::RightClick => Action::RightClick(params(kind, value)?),
            ActionKind::Move => Action::Move(params(kind, value)?),
            ActionKind::Scroll => Action::Scroll(params(kind, value)?),
            ActionKind::Type => Action::Type(params(kind, value)?),
            ActionKind::WriteInstant => Action::WriteInstant(params(kind, value)?),
            ActionKind::Press => Action::Press(params(kind, value)?),
            ActionKind::Hotkey => Action::Hotkey(params(kind, value)?),
            ActionKind::KeyDown => Action::KeyDown(params(kind, value)?),
            ActionKind::KeyUp => Action::KeyUp(params(kind, value)?),
            ActionKind::Sleep => Action::Sleep(params(kind, value)?),
            ActionKind::Screenshot => Action::Screenshot(params(kind, value)?),
            ActionKind::Focus => Action::Focus(params(kind, value)?),
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Click(_) => ActionKind::Click,
            Action::DoubleClick(_) => ActionKind::DoubleClick,
            Action::RightClick(_) => ActionKind::RightClick,
            Action::Move(_) => ActionKind::Move,
            Action::Scroll(_) => ActionKind::Scroll,
            Action::Type(_) => ActionKind::Type,
            Action::WriteInstant(_) => ActionKind::WriteInstant,
            Action::Press(_) => ActionKind::Press,
            Action::Hotkey(_) => ActionKind::Hotkey,
            Action::KeyDown(_) => ActionKind::KeyDown,
            Action::KeyUp(_) => ActionKind::KeyUp,
            Action::Sleep(_) => ActionKind::Sleep,
            Action::Screenshot(_) => ActionKind::Screenshot,
            Action::Focus(_) => ActionKind::Focus,
        }
    }
}

fn params<T: DeserializeOwned>(kind: ActionKind, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| {
        ControlError::invalid(format!("Invalid parameters for '{}': {}", kind.as_str(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_round_trips_its_name() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActionKind::parse("Click"), None);
    }

    #[test]
    fn test_parse_reads_params_beside_type() {
        let action = Action::parse(&json!({"type": "move", "x": 10, "y": 20})).unwrap();
        match action {
            Action::Move(m) => assert_eq!((m.x, m.y, m.duration), (10, 20, 0.0)),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = Action::parse(&json!({"type": "bogus"})).unwrap_err();
        assert_eq!(err.to_string(), "Unknown action type: bogus");
    }

    #[test]
    fn test_missing_type_is_invalid_input() {
        assert!(matches!(
            Action::parse(&json!({"x": 1})),
            Err(ControlError::InvalidInput(_))
        ));
        assert!(matches!(
            Action::parse(&json!({"type": 5})),
            Err(ControlError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bad_params_are_invalid_input() {
        let err = Action::parse(&json!({"type": "press"})).unwrap_err();
        assert!(matches!(err, ControlError::InvalidInput(_)));
        assert!(err.to_string().starts_with("Invalid parameters for 'press'"));
    }
}
