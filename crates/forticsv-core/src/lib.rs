// forticsv-core: domain logic between forticsv-api and the CLI.
//
// Everything here is pure -- no I/O. The catalog maps item types to their
// endpoint/schema pairs, the flattener turns raw records into CSV text,
// and the lookup module resolves object references to display values.

pub mod catalog;
pub mod flatten;
pub mod lookup;
pub mod model;

pub use catalog::{ItemSelection, ItemSpec, ItemType};
pub use flatten::build_csv;
pub use lookup::Lookup;
pub use model::{AddressObject, IpPool, Vip, from_results};
