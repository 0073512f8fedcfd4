//! Property tests for the cardinality cell policy.

use proptest::prelude::*;

use unvcf_model::Cardinality;

fn slot() -> impl Strategy<Value = String> {
    "[A-Za-z0-9/|.]{0,4}"
}

proptest! {
    #[test]
    fn fixed_present_cells_have_exactly_n_slots(
        count in 1usize..8,
        values in prop::collection::vec(slot(), 1..12),
    ) {
        let raw = values.join(",");
        prop_assume!(raw != ".");
        let cell = Cardinality::Fixed(count).present_cell(&raw);
        prop_assert_eq!(cell.slots().len(), count);
        prop_assert_eq!(cell.text().split(',').count(), count);
        prop_assert_eq!(cell.dropped_slots(), values.len().saturating_sub(count));
    }

    #[test]
    fn padding_keeps_supplied_values_in_order(
        count in 1usize..8,
        values in prop::collection::vec("[0-9]{1,3}", 1..8),
    ) {
        prop_assume!(values.len() <= count);
        let cell = Cardinality::Fixed(count).present_cell(&values.join(","));
        prop_assert_eq!(&cell.slots()[..values.len()], values.as_slice());
        prop_assert!(cell.slots()[values.len()..].iter().all(String::is_empty));
    }

    #[test]
    fn absent_fixed_fields_collapse_to_one_slot(count in 1usize..64) {
        let cell = Cardinality::Fixed(count).absent_cell();
        prop_assert_eq!(cell.text(), ".");
        prop_assert_eq!(cell.slots().len(), 1);
    }

    #[test]
    fn flag_presence_ignores_value(value in "[ -~]{0,8}") {
        prop_assert_eq!(Cardinality::Fixed(0).present_cell(&value).text(), "1");
        prop_assert_eq!(Cardinality::Fixed(0).absent_cell().text(), "0");
    }

    #[test]
    fn variable_values_are_never_split(value in "[A-Za-z0-9,.]{1,16}") {
        let cell = Cardinality::Variable.present_cell(&value);
        prop_assert_eq!(cell.slots().len(), 1);
        prop_assert_eq!(cell.text(), value);
    }
}
