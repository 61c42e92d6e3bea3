//! Prints every sentence decoded from an NMEA 0183 log.
//!
//! ```text
//! cargo run --example nmea_log -- capture.nmea
//! RUST_LOG=debug cargo run --example nmea_log < capture.nmea
//! ```

use std::{
    env,
    fs::File,
    io::{self, BufRead, BufReader},
};

use nmea0183_gnss::{
    ChecksumMode, SentenceProcessor,
    nmea_content::{
        GgaDecoder, GllDecoder, GsaDecoder, GsvDecoder, RmcDecoder, VtgDecoder, ZdaDecoder,
    },
};

fn main() -> io::Result<()> {
    env_logger::init();

    let input: Box<dyn BufRead> = match env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut gga = GgaDecoder::new();
    gga.on_position_received(|position| println!("GGA {position:?}"));

    let mut gll = GllDecoder::new();
    gll.on_geographic_latitude_longitude_received(|position| println!("GLL {position:?}"));

    let mut rmc = RmcDecoder::new();
    rmc.on_position_course_and_time_received(|position| println!("RMC {position:?}"));

    let mut gsa = GsaDecoder::new();
    gsa.on_active_satellites_received(|active| println!("GSA {active:?}"));

    let mut vtg = VtgDecoder::new();
    vtg.on_course_and_velocity_received(|course| println!("VTG {course:?}"));

    let mut gsv = GsvDecoder::new();
    gsv.on_satellites_in_view_received(|in_view| {
        println!(
            "GSV {} with {} satellites",
            in_view.talker_id,
            in_view.satellites.len()
        );
        for satellite in &in_view.satellites {
            println!("    {satellite:?}");
        }
    });

    let mut zda = ZdaDecoder::new();
    zda.on_date_and_time_received(|date_and_time| println!("ZDA {date_and_time:?}"));

    let checksum_mode = match env::var("NMEA_CHECKSUM").as_deref() {
        Ok("optional") => ChecksumMode::Optional,
        _ => ChecksumMode::Required,
    };

    let mut processor = SentenceProcessor::builder()
        .checksum_mode(checksum_mode)
        .build();
    processor
        .register_decoder(gga)
        .register_decoder(gll)
        .register_decoder(rmc)
        .register_decoder(gsa)
        .register_decoder(vtg)
        .register_decoder(gsv)
        .register_decoder(zda);

    let mut dropped = 0usize;
    for line in input.lines() {
        let line = line?;
        if let Err(e) = processor.try_process(line.trim_end()) {
            log::debug!("{e}");
            dropped += 1;
        }
    }

    eprintln!("{dropped} lines dropped");
    Ok(())
}
