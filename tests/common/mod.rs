// SPDX-License-Identifier: MIT

//! Shared fakes for controller integration tests: recording surfaces and a
//! cloneable blob store handle so a simulated restart can reuse the same
//! storage.

use std::cell::RefCell;
use std::rc::Rc;

use waylog::error::Result;
use waylog::models::{Coords, WorkoutKind};
use waylog::services::InteractionController;
use waylog::store::{BlobStore, MemoryStore};
use waylog::surfaces::{FormSurface, ListEntry, ListSurface, MapSurface};

/// Every surface effect the controller can request, in call order.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum SurfaceCall {
    SetView {
        coords: Coords,
        zoom: u8,
    },
    AddMarker {
        coords: Coords,
        kind: WorkoutKind,
        popup: String,
    },
    FormShown,
    DistanceFocused,
    FormHidden,
    FieldsToggled(WorkoutKind),
    InvalidReported(String),
    UnavailableReported(String),
    EntryRendered(ListEntry),
}

/// Shared call log, cloned into each recording surface.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

#[allow(dead_code)]
impl Recorder {
    pub fn push(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

pub struct RecordingMap(pub Recorder);

impl MapSurface for RecordingMap {
    fn set_view(&mut self, coords: Coords, zoom: u8) {
        self.0.push(SurfaceCall::SetView { coords, zoom });
    }

    fn add_marker(&mut self, coords: Coords, kind: WorkoutKind, popup: &str) {
        self.0.push(SurfaceCall::AddMarker {
            coords,
            kind,
            popup: popup.to_string(),
        });
    }
}

pub struct RecordingForm(pub Recorder);

impl FormSurface for RecordingForm {
    fn show(&mut self) {
        self.0.push(SurfaceCall::FormShown);
    }

    fn focus_distance(&mut self) {
        self.0.push(SurfaceCall::DistanceFocused);
    }

    fn hide_and_clear(&mut self) {
        self.0.push(SurfaceCall::FormHidden);
    }

    fn toggle_variant_fields(&mut self, kind: WorkoutKind) {
        self.0.push(SurfaceCall::FieldsToggled(kind));
    }

    fn report_invalid(&mut self, message: &str) {
        self.0.push(SurfaceCall::InvalidReported(message.to_string()));
    }

    fn report_unavailable(&mut self, message: &str) {
        self.0
            .push(SurfaceCall::UnavailableReported(message.to_string()));
    }
}

pub struct RecordingList(pub Recorder);

impl ListSurface for RecordingList {
    fn render_entry(&mut self, entry: &ListEntry) {
        self.0.push(SurfaceCall::EntryRendered(entry.clone()));
    }
}

/// Blob store handle that can outlive a controller, for restart scenarios.
#[derive(Clone, Default)]
pub struct SharedStore(Rc<RefCell<MemoryStore>>);

impl BlobStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().set(key, value)
    }
}

/// Wire a controller over recording surfaces and the given store, with the
/// standing zoom level 13.
#[allow(dead_code)]
pub fn controller_with(recorder: &Recorder, store: SharedStore) -> InteractionController {
    InteractionController::new(
        Box::new(RecordingMap(recorder.clone())),
        Box::new(RecordingForm(recorder.clone())),
        Box::new(RecordingList(recorder.clone())),
        Box::new(store),
        13,
    )
}
