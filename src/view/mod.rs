// Derived projections over the observable stores

mod detail;
mod list;

pub use detail::{project_detail, DetailSnapshot, DetailView};
pub use list::{project_list, Filter, ListView, Sort};
