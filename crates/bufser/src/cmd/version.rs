use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("bufser {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: bufser");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("BUFSER_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("byte_order: little-endian (fixed)");
    println!("default_capacity: {}", bufser_channel::DEFAULT_CAPACITY);
    println!(
        "max_sequence_len: {}",
        bufser_channel::DEFAULT_MAX_SEQUENCE_LEN
    );

    Ok(SUCCESS)
}
