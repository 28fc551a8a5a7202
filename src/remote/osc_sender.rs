use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rosc::encoder;
use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, error};

use crate::error::{OscSendError, Result};
use crate::general::logging::{print_sent, LogConfig};
use crate::general::message::Message;
use crate::remote::scheduler::Scheduler;

/// Delay before the send fires, once the runtime is up.
pub const SEND_DELAY: Duration = Duration::ZERO;
/// Grace period between the send returning and the run ending.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(10);

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 31337;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    /// Reserved for a stream transport; always refused.
    Tcp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Tcp => write!(f, "TCP"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl Default for Destination {
    fn default() -> Self {
        Destination {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Where encoded datagrams go. Fire and forget: a successful return only
/// means the bytes left the local socket.
pub trait DatagramSink: Send + Sync + 'static {
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send;
}

/// UDP sink binding an ephemeral local port of the target's address family.
#[derive(Clone, Copy, Debug, Default)]
pub struct UdpSink;

impl DatagramSink for UdpSink {
    fn send_to(
        &self,
        buf: &[u8],
        target: SocketAddr,
    ) -> impl Future<Output = io::Result<usize>> + Send {
        async move {
            let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
            let socket = UdpSocket::bind(local).await?;
            socket.send_to(buf, target).await
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    SendScheduled,
    Sent,
    ShutdownScheduled,
    Terminated,
}

/// What a finished run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReport {
    pub states: Vec<TransportState>,
    pub target: SocketAddr,
    pub bytes_sent: usize,
}

/// A single message bound for a single destination, run once.
#[derive(Clone, Debug)]
pub struct SendJob {
    message: Message,
    destination: Destination,
    protocol: Protocol,
    log: LogConfig,
}

impl SendJob {
    pub fn new(message: Message, destination: Destination, protocol: Protocol, log: LogConfig) -> Self {
        SendJob {
            message,
            destination,
            protocol,
            log,
        }
    }

    /// Send the message once, then wait out the shutdown grace period.
    ///
    /// Protocol and address problems are reported before any timer is
    /// armed. Local socket errors surface only after the grace period.
    pub async fn run<S: DatagramSink>(self, sink: Arc<S>, scheduler: &Scheduler) -> Result<SendReport> {
        let mut states = vec![TransportState::Idle];
        if self.protocol == Protocol::Tcp {
            return Err(OscSendError::UnimplementedProtocol(Protocol::Tcp));
        }
        let target = resolve(&self.destination).await?;
        debug!("Resolved {} to {}", self.destination, target);

        let packet = self.message.to_packet();
        let send = scheduler.call_later(SEND_DELAY, async move {
            let buf = encoder::encode(&packet)?;
            let sent = sink.send_to(&buf, target).await?;
            Ok::<usize, OscSendError>(sent)
        });
        states.push(TransportState::SendScheduled);

        let outcome = send.wait().await?;
        states.push(TransportState::Sent);
        match &outcome {
            Ok(bytes_sent) => print_sent(&self.log, &self.message, *bytes_sent, target),
            Err(e) => error!("Failed to send to {}: {}", target, e),
        }

        let shutdown = scheduler.call_later(SHUTDOWN_GRACE, async {});
        states.push(TransportState::ShutdownScheduled);
        shutdown.wait().await?;
        states.push(TransportState::Terminated);
        debug!("Send job finished");

        Ok(SendReport {
            states,
            target,
            bytes_sent: outcome?,
        })
    }
}

async fn resolve(destination: &Destination) -> Result<SocketAddr> {
    let unresolved = || OscSendError::Resolve {
        host: destination.host.clone(),
        port: destination.port,
    };
    lookup_host((destination.host.as_str(), destination.port))
        .await
        .map_err(|_| unresolved())?
        .next()
        .ok_or_else(unresolved)
}
