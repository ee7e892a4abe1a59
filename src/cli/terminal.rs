//! Terminal renditions of the session's capabilities.
//!
//! The map has no canvas here: markers and the base view are logged, and a
//! pan prints where the map would move. The form is pre-filled from
//! command-line arguments.

use std::time::Duration;

use crate::model::{ActivityKind, Coords};
use crate::session::{
    Alert, FormFields, ListEntry, MapView, PanOptions, Popup, WorkoutForm, WorkoutList,
};

use super::format::{format_entry, format_pan};

/// A map that reports what it would draw.
#[derive(Debug, Default)]
pub struct TerminalMap {
    markers: usize,
}

impl MapView for TerminalMap {
    /// Position of the marker in placement order.
    type Marker = usize;

    fn render_base(&mut self, at: Coords, zoom: u8) {
        tracing::debug!(%at, zoom, "map view set");
    }

    fn pan_to(&mut self, to: Coords, zoom: u8, options: PanOptions) {
        println!("{}", format_pan(to, zoom, options));
    }

    fn place_marker(&mut self, at: Coords, popup: &Popup) -> usize {
        self.markers += 1;
        tracing::debug!(%at, class = %popup.class_name, content = %popup.content, "marker placed");
        self.markers
    }
}

/// A form whose fields were typed on the command line.
#[derive(Debug)]
pub struct TerminalForm {
    fields: FormFields,
    visible: bool,
}

impl TerminalForm {
    /// An empty form; nothing will be submitted from it.
    pub fn empty() -> Self {
        Self::prefilled(FormFields::empty())
    }

    /// A form holding `fields`, with the running row showing.
    ///
    /// The kind always starts at running, as the select does. Callers switch
    /// to cycling through the session's type toggle.
    pub fn prefilled(fields: FormFields) -> Self {
        Self {
            fields: FormFields {
                kind: ActivityKind::Running,
                ..fields
            },
            visible: false,
        }
    }
}

impl WorkoutForm for TerminalForm {
    fn read(&self) -> FormFields {
        self.fields.clone()
    }

    fn toggle_field_visibility(&mut self) {
        self.fields.kind = self.fields.kind.toggled();
        tracing::debug!(kind = self.fields.kind.as_str(), "form rows toggled");
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn focus_distance(&mut self) {
        tracing::trace!("distance field focused");
    }

    fn clear(&mut self) {
        self.fields = FormFields {
            kind: self.fields.kind,
            ..FormFields::empty()
        };
    }

    fn hide(&mut self, reappear_after: Duration) {
        // A terminal has no transition to wait for.
        self.visible = false;
        tracing::trace!(?reappear_after, visible = self.visible, "form hidden");
    }
}

/// Prints each list entry on its own line.
#[derive(Debug)]
pub struct TerminalList {
    echo: bool,
}

impl TerminalList {
    /// `echo: false` keeps the list off stdout.
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl WorkoutList for TerminalList {
    fn append_entry(&mut self, entry: &ListEntry) {
        tracing::trace!(id = %entry.id, kind = entry.kind.as_str(), "list entry appended");
        if self.echo {
            println!("{}", format_entry(entry));
        }
    }
}

/// Reports alerts on stderr.
#[derive(Debug, Default)]
pub struct TerminalAlert;

impl Alert for TerminalAlert {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}
