mod chronometer;
mod configuration;
mod logger;

use self::{
    configuration::{Configuration, Mode},
    logger::{Logger, PartialLogger},
};
use base64_transfer::{open_decode_stream, open_encode_stream, Error};
use std::{
    io::{self, BufWriter, Read, Write},
    process::ExitCode,
};

const PROGRESS_INTERVAL: usize = 1024;

fn main() -> ExitCode {
    let configuration = match Configuration::new() {
        Ok(configuration) => configuration,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Usage: base64-transfer <encode|decode>");
            return ExitCode::from(2);
        }
    };

    if let Err(error) = Logger::new(configuration.log_level()).install() {
        eprintln!("Could not install logger: {}", error);
    }

    match run(&configuration, io::stdin().lock(), io::stdout().lock()) {
        Ok(total) => {
            log::info!("Finished {} of {} input bytes", configuration.mode(), total);
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{} failed: {}", configuration.mode(), error);
            eprintln!("base64-transfer: {}", error);
            ExitCode::FAILURE
        }
    }
}

/// Pumps `input` through the configured stream into `output`, returning the
/// number of input bytes consumed.
fn run(configuration: &Configuration, input: impl Read, output: impl Write) -> Result<usize, Error> {
    let options = configuration.options();
    let output = BufWriter::new(output);
    match configuration.mode() {
        Mode::Encode => {
            let mut stream = open_encode_stream(output, options);
            let total = pump(configuration, input, |chunk| stream.write(chunk))?;
            let mut output = stream.finalize()?;
            if total > 0 || options.compress() {
                output.write_all(b"\n")?;
            }
            output.flush()?;
            Ok(total)
        }
        Mode::Decode => {
            let mut stream = open_decode_stream(output, options);
            let total = pump(configuration, input, |chunk| stream.write(chunk))?;
            stream.finalize()?.flush()?;
            Ok(total)
        }
    }
}

fn pump(configuration: &Configuration, mut input: impl Read, mut write: impl FnMut(&[u8]) -> Result<(), Error>) -> Result<usize, Error> {
    let mut buffer = vec![0u8; configuration.chunk_size()];
    let mut progress = PartialLogger::new(PROGRESS_INTERVAL);
    let mut total = 0;
    loop {
        let len = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(len) => len,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error.into()),
        };
        write(&buffer[..len])?;
        total += len;
        progress.log(|index| format!("Processed chunk {} ({} bytes so far)", index, total));
    }
    log::debug!("Read {} chunks", progress.count());
    Ok(total)
}
