use keyboard_types::Modifiers;

/// An event registration recorded against a node.
///
/// The `name` is stored exactly as registered, which depends on the
/// [`ListenerModel`] in effect at registration time: the modern model
/// registers under the plain event name ("click"), the legacy model under
/// the "on"-prefixed name ("onclick").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListener {
    pub name: String,
}

/// The two event-registration models a host document may expose.
///
/// Hosts are probed per call, never once at startup, so that
/// mixed-capability or emulated environments keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerModel {
    /// Listeners are registered under the plain event name and receive the
    /// event object directly.
    #[default]
    Modern,
    /// Listeners are registered under the "on"-prefixed event name.
    Legacy,
}

impl ListenerModel {
    /// The registration name for `event_name` under this model.
    pub fn mangle(self, event_name: &str) -> String {
        match self {
            ListenerModel::Modern => event_name.to_string(),
            ListenerModel::Legacy => format!("on{event_name}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomEvent {
    pub target: usize,
    /// Which is true if the event bubbles up through the DOM tree.
    pub bubbles: bool,
    /// Which is true if the event can be canceled.
    pub cancelable: bool,
    /// Where true indicates that the default user agent action was
    /// prevented, and false indicates that it was not.
    pub default_prevented: bool,
    pub stop_propagation: bool,
    pub data: DomEventData,
}

impl DomEvent {
    pub fn new(target: usize, data: DomEventData) -> Self {
        Self {
            target,
            bubbles: true,
            cancelable: true,
            default_prevented: false,
            stop_propagation: false,
            data,
        }
    }

    pub fn prevent_default(&mut self) {
        if !self.cancelable {
            return;
        }
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.stop_propagation = true;
    }

    /// Returns the name of the event ("click", "mousedown", etc)
    pub fn name(&self) -> &'static str {
        self.data.name()
    }
}

#[derive(Debug, Clone)]
pub enum DomEventData {
    MouseDown(MouseButtonEvent),
    MouseUp(MouseButtonEvent),
    Click(MouseButtonEvent),
    /// The host is about to begin a text selection at the target.
    SelectStart,
}

impl DomEventData {
    pub fn name(&self) -> &'static str {
        match self {
            DomEventData::MouseDown { .. } => "mousedown",
            DomEventData::MouseUp { .. } => "mouseup",
            DomEventData::Click { .. } => "click",
            DomEventData::SelectStart => "selectstart",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MouseButtonEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseEventButton,
    pub buttons: MouseEventButtons,
    pub mods: Modifiers,
}

impl MouseButtonEvent {
    pub fn main(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            button: MouseEventButton::Main,
            buttons: MouseEventButtons::Primary,
            mods: Modifiers::empty(),
        }
    }
}

/// The button that changed state in a mousedown/mouseup/click event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MouseEventButton {
    #[default]
    Main,
    Auxiliary,
    Secondary,
}

bitflags::bitflags! {
    /// The set of buttons held during a mouse event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct MouseEventButtons: u8 {
        const Primary = 0b0000_0001;
        const Secondary = 0b0000_0010;
        const Auxiliary = 0b0000_0100;
    }
}
