//! protoc plugin protocol: one `CodeGeneratorRequest` in, one
//! `CodeGeneratorResponse` out.

use crate::error::{Error, Result};
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{Read, Write};

/// Read and decode the whole request.
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    Ok(CodeGeneratorRequest::decode(input.as_slice())?)
}

/// Encode the response and write it in one go.
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    let mut output = Vec::with_capacity(response.encoded_len());
    response.encode(&mut output)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(())
}

/// A response carrying only `err`; protoc reports it and emits nothing.
pub fn error_response(err: &Error) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        ..Default::default()
    }
}
