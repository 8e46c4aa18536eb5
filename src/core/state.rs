//! # Application State
//!
//! Core business state for Nafta. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── load: LoadStatus               // loading / ready / failed
//! ├── data: Option<Arc<DataSet>>     // reference data once loaded
//! ├── form: Option<TripForm>         // selectors, toggle, hours
//! ├── result: Option<ResultView>     // last successful calculation
//! ├── banner: Option<String>         // dismissible calculation error
//! ├── status_message: String         // status bar text
//! ├── source: String                 // where the data came from
//! └── default_trip_type: TripType    // initial toggle position
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::calculator::TripType;
use crate::core::config::ResolvedConfig;
use crate::core::form::TripForm;
use crate::core::present::ResultView;
use crate::data::{DataSet, LoadError};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(LoadError),
}

pub struct App {
    pub load: LoadStatus,
    pub data: Option<Arc<DataSet>>,
    pub form: Option<TripForm>,
    pub result: Option<ResultView>,
    pub banner: Option<String>,
    pub status_message: String,
    pub source: String,
    pub default_trip_type: TripType,
}

impl App {
    pub fn new(source: String, default_trip_type: TripType) -> Self {
        Self {
            load: LoadStatus::Loading,
            data: None,
            form: None,
            result: None,
            banner: None,
            status_message: format!("Loading data from {source}..."),
            source,
            default_trip_type,
        }
    }

    pub fn from_config(source: String, config: &ResolvedConfig) -> Self {
        Self::new(source, config.default_trip_type)
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadStatus::Loading
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.load {
            LoadStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Install freshly loaded data and build a blank form over it.
    pub(crate) fn install(&mut self, data: DataSet) {
        let data = Arc::new(data);
        self.form = Some(TripForm::new(
            data.locations.clone(),
            data.vehicles.clone(),
            &data.prices,
            self.default_trip_type,
        ));
        self.status_message = format!(
            "{} locations, {} vehicles, {} fuel prices, {} routes",
            data.locations.len(),
            data.vehicles.len(),
            data.prices.len(),
            data.routes.len()
        );
        self.data = Some(data);
        self.load = LoadStatus::Ready;
        self.result = None;
        self.banner = None;
    }
}
