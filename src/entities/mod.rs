//! Domain entities of the Medoc API

pub mod drug_brand;
pub mod drug_name;
pub mod macros;
pub mod user_drug;

pub use drug_brand::{DrugBrand, NewDrugBrand};
pub use drug_name::DrugName;
pub use user_drug::{DrugForm, DrugUnit, NewUserDrug, UserDrug};
