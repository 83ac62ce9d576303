// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CategoryKind, Certificates, CriterionScore, ManufacturerMatch, ManufacturerProfile,
    ManufacturerSettings, MatchBreakdown, ProductRecord, Project, ProjectRequirements,
    SelectedProduct,
};
pub use requests::{ContactRequest, FindMatchesRequest};
pub use responses::{
    ContactResponse, ContactedResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
};
