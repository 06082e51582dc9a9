use super::rates::{Currency, RateTable};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Displayed text of the three amount fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTriple {
    usd: String,
    eur: String,
    rub: String,
}

impl FieldTriple {
    pub fn get(&self, field: Currency) -> &str {
        match field {
            Currency::Usd => &self.usd,
            Currency::Eur => &self.eur,
            Currency::Rub => &self.rub,
        }
    }

    fn set(&mut self, field: Currency, text: &str) {
        let slot = match field {
            Currency::Usd => &mut self.usd,
            Currency::Eur => &mut self.eur,
            Currency::Rub => &mut self.rub,
        };
        slot.clear();
        slot.push_str(text);
    }

    pub fn all_empty(&self) -> bool {
        self.usd.is_empty() && self.eur.is_empty() && self.rub.is_empty()
    }
}

/// A programmatic write to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub field: Currency,
    pub text: String,
}

/// Shared "update in progress" flag.
#[derive(Debug, Clone, Default)]
struct Reentrancy(Rc<Cell<bool>>);

impl Reentrancy {
    fn is_engaged(&self) -> bool {
        self.0.get()
    }

    /// Returns `None` when someone already holds the flag.
    fn engage(&self) -> Option<ReentrancyGuard> {
        if self.0.replace(true) {
            None
        } else {
            Some(ReentrancyGuard(self.0.clone()))
        }
    }
}

struct ReentrancyGuard(Rc<Cell<bool>>);

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Three mutually synchronized amount fields over a shared rate table.
///
/// Writing a field behaves like a text box: the text-changed handler runs
/// synchronously for programmatic writes too. The re-entrancy flag turns
/// those nested notifications into no-ops.
#[derive(Debug, Default)]
pub struct Converter {
    rates: RateTable,
    fields: FieldTriple,
    updating: Reentrancy,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn fields(&self) -> &FieldTriple {
        &self.fields
    }

    pub fn is_updating(&self) -> bool {
        self.updating.is_engaged()
    }

    /// Replace the whole table.
    pub fn on_rates_updated(&mut self, table: RateTable) {
        debug!(pairs = table.len(), "rate table replaced");
        self.rates = table;
    }

    /// The user typed `text` into `field`.
    ///
    /// Returns the writes made to the other two fields; empty when the text
    /// is not a number, no rates are loaded, or an update is in progress.
    pub fn on_field_edited(&mut self, field: Currency, text: &str) -> Vec<FieldWrite> {
        self.fields.set(field, text);
        self.text_changed(field, text)
    }

    /// Empty all three fields. Works whether or not an update is in progress.
    pub fn clear_all(&mut self) -> Vec<FieldWrite> {
        let _guard = self.updating.engage();
        Currency::ALL
            .into_iter()
            .map(|field| {
                self.write_field(field, "");
                FieldWrite {
                    field,
                    text: String::new(),
                }
            })
            .collect()
    }

    fn text_changed(&mut self, field: Currency, text: &str) -> Vec<FieldWrite> {
        if self.updating.is_engaged() || self.rates.is_empty() {
            return Vec::new();
        }
        let Some(value) = parse_amount(text) else {
            return Vec::new();
        };
        let Some(_guard) = self.updating.engage() else {
            return Vec::new();
        };

        let mut writes = Vec::with_capacity(2);
        for target in field.others() {
            let Some(rate) = self.rates.rate(field, target) else {
                debug!(from = %field, to = %target, "no rate for pair; stopping update");
                break;
            };
            let text = format_amount(value * rate);
            self.write_field(target, &text);
            writes.push(FieldWrite {
                field: target,
                text,
            });
        }
        writes
    }

    fn write_field(&mut self, field: Currency, text: &str) {
        self.fields.set(field, text);
        let cascaded = self.text_changed(field, text);
        debug_assert!(cascaded.is_empty());
    }
}

/// Parse user input as an amount. Surrounding whitespace is ignored;
/// infinities and NaN are not amounts.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Converter {
        let mut conv = Converter::new();
        conv.on_rates_updated(RateTable::from_usd_quotes(0.9, 90.0).unwrap());
        conv
    }

    #[test]
    fn usd_edit_fills_eur_and_rub() {
        let mut conv = loaded();
        let writes = conv.on_field_edited(Currency::Usd, "100");

        assert_eq!(conv.fields().get(Currency::Usd), "100");
        assert_eq!(conv.fields().get(Currency::Eur), "90.00");
        assert_eq!(conv.fields().get(Currency::Rub), "9000.00");
        assert_eq!(writes.len(), 2);
        assert!(!conv.is_updating());
    }

    #[test]
    fn rub_edit_uses_cross_rates() {
        let mut conv = loaded();
        conv.on_field_edited(Currency::Rub, "450");

        assert_eq!(conv.fields().get(Currency::Usd), "5.00");
        assert_eq!(conv.fields().get(Currency::Eur), "4.50");
    }

    #[test]
    fn matches_two_decimal_rounding_for_many_inputs() {
        let mut conv = loaded();
        for x in [0.0, 0.01, 1.005, 3.333, 12.5, 99.99, 1234.5678, -7.25] {
            conv.on_field_edited(Currency::Usd, &x.to_string());
            assert_eq!(conv.fields().get(Currency::Eur), format!("{:.2}", x * 0.9));
            assert_eq!(conv.fields().get(Currency::Rub), format!("{:.2}", x * 90.0));
        }
    }

    #[test]
    fn empty_table_writes_nothing() {
        let mut conv = Converter::new();
        for field in Currency::ALL {
            let writes = conv.on_field_edited(field, "42");
            assert!(writes.is_empty());
            for other in field.others() {
                assert_eq!(conv.fields().get(other), "");
            }
        }
    }

    #[test]
    fn non_numeric_text_is_ignored() {
        let mut conv = loaded();
        conv.on_field_edited(Currency::Usd, "10");
        let writes = conv.on_field_edited(Currency::Usd, "10a");

        assert!(writes.is_empty());
        assert_eq!(conv.fields().get(Currency::Usd), "10a");
        assert_eq!(conv.fields().get(Currency::Eur), "9.00");
        assert!(conv.on_field_edited(Currency::Eur, "inf").is_empty());
    }

    #[test]
    fn engaged_guard_suppresses_recompute() {
        let mut conv = loaded();
        let guard = conv.updating.engage().expect("guard was free");
        assert!(conv.on_field_edited(Currency::Usd, "5").is_empty());
        assert_eq!(conv.fields().get(Currency::Eur), "");
        drop(guard);

        assert_eq!(conv.on_field_edited(Currency::Usd, "5").len(), 2);
    }

    #[test]
    fn clear_all_empties_fields_even_while_guarded() {
        let mut conv = loaded();
        conv.on_field_edited(Currency::Eur, "3");
        let clears = conv.clear_all();
        assert_eq!(clears.len(), 3);
        assert!(conv.fields().all_empty());

        conv.on_field_edited(Currency::Eur, "3");
        let _guard = conv.updating.engage().expect("guard was free");
        conv.clear_all();
        assert!(conv.fields().all_empty());
    }

    #[test]
    fn parse_amount_trims_and_rejects_non_finite() {
        assert_eq!(parse_amount(" 2.5 "), Some(2.5));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
