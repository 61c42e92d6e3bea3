use std::sync::mpsc::{self, Receiver};

use crate::{
    SentenceProcessor, TalkerId,
    nmea_content::{GsvDecoder, SatellitesInView},
};

const GP_1_OF_3: &str = "$GPGSV,3,1,11,01,65,123,45,02,40,210,30,03,70,300,35,04,20,090,20*72";
const GP_2_OF_3: &str = "$GPGSV,3,2,11,05,50,045,25,06,30,180,15,07,80,270,40,08,10,315,10*77";
const GP_3_OF_3: &str = "$GPGSV,3,3,11,09,40,060,22,10,60,150,33,11,75,240,38*4E";
const GL_1_OF_2: &str = "$GLGSV,2,1,06,65,45,120,25,66,30,200,18,67,60,090,30,68,70,310,35*6E";
const GL_2_OF_2: &str = "$GLGSV,2,2,06,69,20,150,10,70,50,070,28*64";

fn processor() -> (SentenceProcessor, Receiver<SatellitesInView>) {
    let (tx, rx) = mpsc::channel();
    let mut gsv = GsvDecoder::new();
    gsv.satellites_in_view_received().forward_to(tx);

    let mut processor = SentenceProcessor::new();
    processor.register_decoder(gsv);
    (processor, rx)
}

fn prns(group: &SatellitesInView) -> Vec<u16> {
    group.satellites.iter().map(|satellite| satellite.prn).collect()
}

#[test]
fn test_group_emits_after_last_message() {
    let (mut processor, rx) = processor();

    processor.process(GP_1_OF_3);
    assert!(rx.try_recv().is_err());
    processor.process(GP_2_OF_3);
    assert!(rx.try_recv().is_err());
    processor.process(GP_3_OF_3);

    let group = rx.try_recv().unwrap();
    assert_eq!(group.talker_id, TalkerId::GPS);
    assert_eq!(group.total_satellites_in_view, Some(11));
    assert_eq!(prns(&group), (1..=11).collect::<Vec<_>>());
    assert_eq!(group.satellites[10].snr, Some(38));
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_interrupted_group_never_emits() {
    let (mut processor, rx) = processor();

    processor.process(GP_1_OF_3);
    processor.process(GP_2_OF_3);
    processor.process(GP_1_OF_3);
    assert!(rx.try_recv().is_err());

    // the restarted group completes normally
    processor.process(GP_2_OF_3);
    processor.process(GP_3_OF_3);
    assert_eq!(prns(&rx.try_recv().unwrap()).len(), 11);
}

#[test]
fn test_stalled_group_is_discarded() {
    let (mut processor, rx) = processor();

    processor.process(GP_1_OF_3);
    processor.process(GP_3_OF_3);
    assert!(rx.try_recv().is_err());

    processor.process(GP_2_OF_3);
    processor.process(GP_3_OF_3);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_talkers_accumulate_independently() {
    let (mut processor, rx) = processor();

    processor.process(GP_1_OF_3);
    processor.process(GL_1_OF_2);
    processor.process(GP_2_OF_3);
    processor.process(GL_2_OF_2);

    let glonass = rx.try_recv().unwrap();
    assert_eq!(glonass.talker_id, TalkerId::GLONASS);
    assert_eq!(prns(&glonass), vec![65, 66, 67, 68, 69, 70]);

    processor.process(GP_3_OF_3);
    let gps = rx.try_recv().unwrap();
    assert_eq!(gps.talker_id, TalkerId::GPS);
    assert_eq!(prns(&gps), (1..=11).collect::<Vec<_>>());
}

#[test]
fn test_single_message_groups() {
    let (mut processor, rx) = processor();

    processor.process("$GPGSV,1,1,01,01,90,100,50*44");
    processor.process("$GPGSV,1,1,00*79");
    processor.process("$GPGSV,1,1,01,05,45,,,1*61");

    let first = rx.try_recv().unwrap();
    assert_eq!(prns(&first), vec![1]);
    assert_eq!(first.signal_id, None);

    let empty = rx.try_recv().unwrap();
    assert!(empty.satellites.is_empty());
    assert_eq!(empty.total_satellites_in_view, Some(0));

    let with_signal = rx.try_recv().unwrap();
    assert_eq!(with_signal.signal_id, Some(1));
    assert_eq!(with_signal.satellites[0].azimuth, None);
    assert_eq!(with_signal.satellites[0].snr, None);
}

#[test]
fn test_inconsistent_counters_leave_group_untouched() {
    let (mut processor, rx) = processor();

    processor.process(GP_1_OF_3);
    // message 4 of 3
    processor.process("$GPGSV,3,4,11,12,40,060,22*4F");
    processor.process(GP_2_OF_3);
    processor.process(GP_3_OF_3);

    assert_eq!(prns(&rx.try_recv().unwrap()).len(), 11);
}

#[test]
fn test_total_change_abandons_group() {
    let (mut processor, rx) = processor();

    processor.process("$GPGSV,2,1,08,01,65,123,45,02,40,210,30,03,70,300,35,04,20,090,20*7B");
    processor.process(GP_2_OF_3);
    processor.process("$GPGSV,2,2,08,05,50,045,25,06,30,180,15,07,80,270,40,08,10,315,10*7E");
    assert!(rx.try_recv().is_err());

    processor.process("$GPGSV,2,1,08,01,65,123,45,02,40,210,30,03,70,300,35,04,20,090,20*7B");
    processor.process("$GPGSV,2,2,08,05,50,045,25,06,30,180,15,07,80,270,40,08,10,315,10*7E");
    assert_eq!(prns(&rx.try_recv().unwrap()), (1..=8).collect::<Vec<_>>());
}
