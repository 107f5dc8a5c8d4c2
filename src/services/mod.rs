pub mod alerts;
pub mod elasticsearch;

pub use alerts::AlertService;
pub use elasticsearch::EsClient;
