use super::rates::{Currency, RateTable};
use super::widget::{Converter, FieldTriple, FieldWrite};
use crate::error::TriptychError;
use crate::signals::{CommonSignals, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;

/// The converter window: one [`Converter`] wired to the shared signals.
///
/// The converter subscribes to `rates_updated` and `clear_all` when the app
/// is built and unsubscribes on drop.
pub struct ConverterApp {
    converter: Rc<RefCell<Converter>>,
    signals: CommonSignals,
    rates_sub: SubscriptionId,
    clear_sub: SubscriptionId,
}

impl ConverterApp {
    pub fn new() -> Self {
        let converter = Rc::new(RefCell::new(Converter::new()));
        let mut signals = CommonSignals::new();

        let c = converter.clone();
        let rates_sub = signals
            .rates_updated
            .connect(move |table: &RateTable| c.borrow_mut().on_rates_updated(table.clone()));
        let c = converter.clone();
        let clear_sub = signals.clear_all.connect(move |_| {
            c.borrow_mut().clear_all();
        });

        Self {
            converter,
            signals,
            rates_sub,
            clear_sub,
        }
    }

    /// Apply the outcome of a rate fetch.
    ///
    /// Success broadcasts the new table; failure is logged and the current
    /// table stays in place.
    pub fn apply_refresh(&mut self, result: Result<RateTable, TriptychError>) -> bool {
        match result {
            Ok(table) => {
                self.signals.rates_updated.emit(&table);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to load exchange rates");
                false
            }
        }
    }

    pub fn edit(&mut self, field: Currency, text: &str) -> Vec<FieldWrite> {
        self.converter.borrow_mut().on_field_edited(field, text)
    }

    pub fn clear_clicked(&mut self) {
        self.signals.clear_all.emit(&());
    }

    pub fn fields(&self) -> FieldTriple {
        self.converter.borrow().fields().clone()
    }

    pub fn has_rates(&self) -> bool {
        !self.converter.borrow().rates().is_empty()
    }

    pub fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        self.converter.borrow().rates().rate(from, to)
    }

    /// Extra subscribers (e.g. a status line) connect here.
    pub fn signals_mut(&mut self) -> &mut CommonSignals {
        &mut self.signals
    }
}

impl Default for ConverterApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConverterApp {
    fn drop(&mut self) {
        self.signals.rates_updated.disconnect(self.rates_sub);
        self.signals.clear_all.disconnect(self.clear_sub);
    }
}
