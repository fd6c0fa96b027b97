//! Property tests for the address codec and amount text forms

use nano_core::{KeyBytes, NanoAccount, NanoAmount, NanoUnit};
use proptest::prelude::*;

const ALPHABET: &[u8] = b"13456789abcdefghijkmnopqrstuwxyz";

fn any_unit() -> impl Strategy<Value = NanoUnit> {
    prop_oneof![
        Just(NanoUnit::Raw),
        Just(NanoUnit::Micro),
        Just(NanoUnit::Milli),
        Just(NanoUnit::Nano),
    ]
}

proptest! {
    #[test]
    fn address_round_trips(key in any::<[u8; 32]>()) {
        let account = NanoAccount::from_public_key(KeyBytes::new(key));
        let address = account.to_address();
        prop_assert!(address.starts_with("nano_"));
        prop_assert_eq!(address.len(), 65);
        prop_assert_eq!(NanoAccount::parse(&address).unwrap(), account);
        prop_assert_eq!(NanoAccount::parse(&address.to_uppercase()).unwrap(), account);
    }

    #[test]
    fn single_character_change_breaks_checksum(
        key in any::<[u8; 32]>(),
        position in 0usize..60,
        replacement in 0usize..32,
    ) {
        let address = NanoAccount::from_public_key(KeyBytes::new(key)).to_address();
        let mut bytes = address.into_bytes();
        let index = 5 + position;
        let new_char = ALPHABET[replacement];
        prop_assume!(bytes[index] != new_char);
        bytes[index] = new_char;
        let tampered = String::from_utf8(bytes).unwrap();
        prop_assert!(NanoAccount::parse(&tampered).is_err());
    }

    #[test]
    fn raw_text_round_trips(raw in any::<u128>()) {
        let amount = NanoAmount::from_raw(raw);
        prop_assert_eq!(NanoAmount::from_raw_str(&amount.to_string()).unwrap(), amount);
    }

    #[test]
    fn unit_text_round_trips(raw in any::<u128>(), unit in any_unit()) {
        let amount = NanoAmount::from_raw(raw);
        let text = amount.to_unit_string(unit);
        prop_assert_eq!(NanoAmount::from_unit_str(&text, unit).unwrap(), amount);
    }
}
