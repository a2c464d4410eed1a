use clap::{Parser, Subcommand};

use std::path::{Path, PathBuf};
use std::time::Instant;

use oml_config::{SharedConfig, toml_config};
use oml_core::{ObjectAddress, debug};
use oml_entities::nm::NmBsc;
use oml_entities::nm::swload::{FileHeader, FileOpener, FsOpener, SegmentSource, parse_manifest};
use oml_entities::{LoopbackTransport, OmlLink};
use oml_pdus::enums::nm_msg_type::NmMsgType;
use oml_pdus::frame::{OmlBody, OmlFrame, build_fom_raw};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A-bis OML toolbox",
    long_about = "Decodes OML frames, inspects software images and dry-runs software loads against a simulated BTS"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one OML frame given as hex
    Decode {
        #[arg(help = "Frame bytes as hex, e.g. 80800005740300ff00")]
        hex: String,
    },
    /// Print the file id and version of a software image
    Header {
        file: PathBuf,
    },
    /// List the images named in a software list file
    Manifest {
        file: PathBuf,
    },
    /// Run a software load against a BTS that acknowledges everything
    Simulate {
        #[arg(help = "Config file (toml)")]
        config: PathBuf,
        #[arg(help = "Software image, or a software list with --list")]
        file: PathBuf,
        #[arg(short = 'l', long = "list", help = "Treat FILE as a software list")]
        list: bool,
    },
}

/// Accepts "80 80 00 05", "80:80:00:05" and "80800005"
fn parse_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace() && *c != ':').collect();
    hex::decode(digits)
}

fn cmd_decode(hex: &str) {
    let data = match parse_hex(hex) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: invalid hex input: {}", e);
            std::process::exit(1);
        }
    };
    let frame = match OmlFrame::parse(&data) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("{}", frame);
    if let OmlBody::Fom(fom) | OmlBody::Manuf { fom, .. } = &frame.body {
        match fom.attributes() {
            Ok(attrs) => {
                for attr in attrs.iter() {
                    println!("  {}", attr);
                }
            }
            Err(e) => println!("  attributes not decodable: {:?}", e),
        }
    }
}

fn cmd_header(file: &Path) {
    let source = match FsOpener.open(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot open {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };
    match source.peek_line().and_then(FileHeader::parse) {
        Some(hdr) => {
            println!("file_id:      {}", String::from_utf8_lossy(&hdr.file_id));
            println!("file_version: {}", String::from_utf8_lossy(&hdr.file_version));
            println!("size:         {} bytes", source.total_len());
        }
        None => {
            eprintln!("Error: {} has no valid @(#) header", file.display());
            std::process::exit(1);
        }
    }
}

fn cmd_manifest(file: &Path) {
    let text = match FsOpener.read(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let files = parse_manifest(dir, &text);
    if files.is_empty() {
        eprintln!("Error: {} lists no images", file.display());
        std::process::exit(1);
    }
    for f in files {
        println!("{}", f.display());
    }
}

/// Answer to a frame from the BSC, as a BTS that accepts everything would send it
fn fake_bts_response(frame: &[u8], window: u8, segs_in_window: &mut u8) -> Option<NmMsgType> {
    let parsed = OmlFrame::parse(frame).ok()?;
    let fom = parsed.fom_message()?;
    match fom.known_type()? {
        NmMsgType::LoadInit => {
            *segs_in_window = 0;
            Some(NmMsgType::LoadInitAck)
        }
        NmMsgType::LoadSeg => {
            *segs_in_window += 1;
            let last = fom.attr_data.get(3) == Some(&0);
            if last || *segs_in_window >= window {
                *segs_in_window = 0;
                Some(NmMsgType::LoadSegAck)
            } else {
                None
            }
        }
        NmMsgType::LoadEnd => Some(NmMsgType::LoadEndAck),
        NmMsgType::ActivateSw => Some(NmMsgType::ActivateSwAck),
        _ => None,
    }
}

fn cmd_simulate(config: SharedConfig, file: &Path, list: bool) {
    let window = config.config().swload.window_size;
    let mut link = OmlLink::new(NmBsc::new(config), LoopbackTransport::new());

    let now = Instant::now();
    let started = if list {
        link.submit(|nm, q| nm.software_list(q, file, now))
    } else {
        link.submit(|nm, q| nm.software_load(q, file, now))
    };
    match started {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let mut segs_in_window = 0;
    let mut frames_sent = 0usize;
    loop {
        let sent = link.transport_mut().take_sent();
        if sent.is_empty() {
            break;
        }
        frames_sent += sent.len();
        for frame in sent {
            let Some(response) = fake_bts_response(&frame, window, &mut segs_in_window) else {
                continue;
            };
            let bytes = match build_fom_raw(response.into_raw(), ObjectAddress::site_manager(), &[]) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            match link.on_frame(&bytes, Instant::now()) {
                Ok(events) => {
                    for ev in events {
                        println!("event: {:?}", ev);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
            if let Some(p) = link.nm().load_progress() {
                tracing::info!("progress {}%", p);
            }
        }
    }
    println!("{} frames sent, final state {:?}", frames_sent, link.nm().load_state());
}

fn main() {
    eprintln!("[+] A-bis OML tool");
    eprintln!(" *  Simulation talks to a fake BTS only  *");

    let args = Args::parse();

    match args.command {
        Command::Decode { hex } => cmd_decode(&hex),
        Command::Header { file } => cmd_header(&file),
        Command::Manifest { file } => cmd_manifest(&file),
        Command::Simulate { config, file, list } => {
            let cfg = match toml_config::from_file(&config) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to load configuration from {}: {}", config.display(), e);
                    std::process::exit(1);
                }
            };
            let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());
            cmd_simulate(cfg, &file, list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_separators() {
        let expected = vec![0x80, 0x80, 0x00, 0x05];
        assert_eq!(parse_hex("80800005").unwrap(), expected);
        assert_eq!(parse_hex("80 80 00 05").unwrap(), expected);
        assert_eq!(parse_hex("80:80:00:05").unwrap(), expected);
        assert!(parse_hex("808").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
