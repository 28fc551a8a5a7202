use std::sync::Arc;

use rosc::{decoder, OscPacket, OscType};
use tokio::net::UdpSocket;

use osc_send::{assemble, Destination, LogConfig, Protocol, Scheduler, SendJob, UdpSink};

async fn send_and_receive(values: &[&str], type_tags: Option<&str>) -> (String, Vec<OscType>) {
    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = receiver.local_addr().unwrap().port();

    let tokens: Vec<String> = values.iter().map(|s| s.to_string()).collect();
    let message = assemble("/loop/back", &tokens, type_tags).unwrap();
    let destination = Destination {
        host: "127.0.0.1".into(),
        port,
    };
    let report = SendJob::new(message, destination, Protocol::Udp, LogConfig::default())
        .run(Arc::new(UdpSink), &Scheduler::new())
        .await
        .unwrap();

    let mut buf = [0u8; decoder::MTU];
    let (size, _) = receiver.recv_from(&mut buf).await.unwrap();
    assert_eq!(size, report.bytes_sent);
    match decoder::decode_udp(&buf[..size]).unwrap().1 {
        OscPacket::Message(m) => (m.addr, m.args),
        OscPacket::Bundle(_) => panic!("expected a message"),
    }
}

#[tokio::test]
async fn inferred_arguments_arrive_in_order() {
    let (addr, args) = send_and_receive(&["42", "3.5", "hello", "-1"], None).await;
    assert_eq!(addr, "/loop/back");
    assert_eq!(
        args,
        vec![
            OscType::Int(42),
            OscType::Float(3.5),
            OscType::String("hello".into()),
            OscType::Int(-1),
        ]
    );
}

#[tokio::test]
async fn tagged_arguments_arrive_in_order() {
    let (_, args) = send_and_receive(&["7", "2", "x", "y", "", "z", "5"], Some("ifTFNIs")).await;
    assert_eq!(
        args,
        vec![
            OscType::Int(7),
            OscType::Float(2.0),
            OscType::Bool(true),
            OscType::Bool(false),
            OscType::Nil,
            OscType::Inf,
            OscType::String("5".into()),
        ]
    );
}

#[tokio::test]
async fn message_without_arguments() {
    let (addr, args) = send_and_receive(&[], None).await;
    assert_eq!(addr, "/loop/back");
    assert!(args.is_empty());
}
