// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use crate::{
    DhcpError, DhcpV6Data, DhcpV6ElapsedTime, DhcpV6Message,
    DhcpV6MessageType, DhcpV6OptionCode, DhcpV6OptionIaAddr,
    DhcpV6OptionIaNa, DhcpV6OptionRelayMsg, DhcpV6OptionRequest,
    DhcpV6OptionStatus, DhcpV6Options, DhcpV6Preference, DhcpV6RapidCommit,
    DhcpV6RelayMessage, DhcpV6StatusCode,
};

fn random_options(rng: &mut impl Rng) -> DhcpV6Options {
    let mut options = DhcpV6Options::new();
    for _ in 0..rng.gen_range(0..16) {
        let code: u16 = rng.gen();
        let len = rng.gen_range(0..64);
        let mut value = vec![0u8; len];
        rng.fill(value.as_mut_slice());
        options.add_raw(code.into(), value);
    }
    options
}

#[test]
fn randomized_options_round_trip() -> Result<(), DhcpError> {
    let mut rng = rand::thread_rng();
    for _ in 0..256 {
        let options = random_options(&mut rng);
        let wire = options.to_vec();

        let msg = DhcpV6Message::new(
            DhcpV6MessageType::Solicit,
            &[0, 0, 1],
            options.clone(),
        )?;
        let parsed = DhcpV6Message::parse(msg.emit().as_slice())?;
        assert_eq!(parsed.options, options);

        // Marshal output is idempotent
        assert_eq!(parsed.options.to_vec(), wire);
    }
    Ok(())
}

#[test]
fn solicit_with_full_option_stack() -> Result<(), DhcpError> {
    let mut ia_options = DhcpV6Options::new();
    ia_options.add(
        DhcpV6OptionCode::IaAddr,
        &DhcpV6OptionIaAddr::new(
            Ipv6Addr::from_str("2001:db8:a::76d").unwrap(),
            120,
            120,
            DhcpV6Options::new(),
        )?,
    );

    let mut options = DhcpV6Options::new();
    options.add_raw(
        DhcpV6OptionCode::ClientId,
        vec![0x00, 0x03, 0x00, 0x01, 0x52, 0x54, 0x00, 0x12, 0x34, 0x56],
    );
    options.add(
        DhcpV6OptionCode::IaNa,
        &DhcpV6OptionIaNa::new([1, 2, 3, 4], 30, 60, ia_options),
    );
    options.add(
        DhcpV6OptionCode::OptionRequest,
        &DhcpV6OptionRequest(vec![
            DhcpV6OptionCode::Unknown(23),
            DhcpV6OptionCode::Unknown(24),
        ]),
    );
    options.add(
        DhcpV6OptionCode::ElapsedTime,
        &DhcpV6ElapsedTime(Duration::from_millis(100)),
    );
    options.add(DhcpV6OptionCode::RapidCommit, &DhcpV6RapidCommit);
    options.add(
        DhcpV6OptionCode::UserClass,
        &DhcpV6Data(vec![b"dhcpv6d-test".to_vec()]),
    );

    let msg =
        DhcpV6Message::new(DhcpV6MessageType::Solicit, &[9, 8, 7], options)?;
    let parsed = DhcpV6Message::parse(msg.emit().as_slice())?;
    assert_eq!(parsed, msg);

    let iana = parsed.options.iana()?;
    assert_eq!(iana.len(), 1);
    assert_eq!(iana[0].t1_sec, 30);
    let addrs = iana[0].options.iaaddr()?;
    assert_eq!(
        addrs[0].address,
        Ipv6Addr::from_str("2001:db8:a::76d").unwrap()
    );
    assert_eq!(
        parsed.options.elapsed_time()?,
        Duration::from_millis(100)
    );
    parsed.options.rapid_commit()?;
    assert_eq!(
        parsed.options.user_class()?.0,
        vec![b"dhcpv6d-test".to_vec()]
    );
    assert_eq!(
        parsed.options.client_id()?.duid_type(),
        crate::DhcpV6DuidType::LinkLayerAddr
    );
    Ok(())
}

#[test]
fn advertise_with_preference_and_status() -> Result<(), DhcpError> {
    let mut options = DhcpV6Options::new();
    options.add(DhcpV6OptionCode::Preference, &DhcpV6Preference(255));
    options.add(
        DhcpV6OptionCode::StatusCode,
        &DhcpV6OptionStatus::new(
            DhcpV6StatusCode::NoAddrsAvail,
            "pool exhausted",
        ),
    );

    let msg = DhcpV6Message::new(
        DhcpV6MessageType::Advertise,
        &[0xa, 0xb, 0xc],
        options,
    )?;
    let parsed = DhcpV6Message::parse(msg.emit().as_slice())?;
    assert_eq!(parsed.options.preference()?, 255);
    let status = parsed.options.status_code()?;
    assert_eq!(status.status, DhcpV6StatusCode::NoAddrsAvail);
    assert_eq!(status.message, "pool exhausted");
    Ok(())
}

#[test]
fn relayed_solicit_unwraps_to_client_message() -> Result<(), DhcpError> {
    let mut client_options = DhcpV6Options::new();
    client_options.add_raw(DhcpV6OptionCode::ClientId, vec![0x00, 0x01]);
    let solicit = DhcpV6Message::new(
        DhcpV6MessageType::Solicit,
        &[1, 2, 3],
        client_options,
    )?;

    let mut relay_options = DhcpV6Options::new();
    relay_options.add(
        DhcpV6OptionCode::RelayMsg,
        &DhcpV6OptionRelayMsg::from_message(&solicit),
    );
    relay_options
        .add_raw(DhcpV6OptionCode::InterfaceId, b"uplink0".to_vec());
    let relay = DhcpV6RelayMessage {
        msg_type: DhcpV6MessageType::RelayForward,
        hop_count: 0,
        link_address: Ipv6Addr::from_str("2001:db8::1").unwrap(),
        peer_address: Ipv6Addr::from_str("fe80::2").unwrap(),
        options: relay_options,
    };

    let parsed = DhcpV6RelayMessage::parse(relay.emit().as_slice())?;
    assert_eq!(parsed, relay);
    assert_eq!(parsed.options.interface_id()?, b"uplink0".to_vec());
    assert_eq!(parsed.options.relay_message()?.message()?, solicit);
    Ok(())
}
