use std::io::{Error, ErrorKind, Read, Result, Write};

use log::error;
use prost::Message;
use protoc_gen_tsjson::descriptor::CodeGeneratorRequest;
use protoc_gen_tsjson::{error_response, Config};

fn main() -> Result<()> {
    env_logger::init();

    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;

    let response = match CodeGeneratorRequest::decode(&*buf) {
        Ok(request) => Config::new().run_plugin(request),
        Err(err) => {
            let err = protoc_gen_tsjson::Error::from(err);
            error!("{}", err);
            error_response(err.to_string())
        }
    };

    let mut out = Vec::new();
    response.encode(&mut out).map_err(|error| {
        Error::new(
            ErrorKind::InvalidData,
            format!("failed to encode CodeGeneratorResponse: {}", error),
        )
    })?;
    std::io::stdout().write_all(&out)?;

    Ok(())
}
