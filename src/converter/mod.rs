mod converter;

pub use converter::convert;
pub use converter::convert_batch;
pub use converter::convert_request;
pub use converter::render;
pub use converter::ConversionResult;
pub use converter::Response;
