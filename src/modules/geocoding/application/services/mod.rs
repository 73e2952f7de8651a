pub mod address_autocomplete;

pub use address_autocomplete::AddressAutocomplete;
