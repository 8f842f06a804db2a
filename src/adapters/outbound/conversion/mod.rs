/// Document to statement converters
mod spdx_statement_converter;

pub use spdx_statement_converter::SpdxStatementConverter;
