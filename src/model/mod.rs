pub use self::{
    models::{Investment, UserProfile},
    table::Table,
};

mod models;
mod table;
