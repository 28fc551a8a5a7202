use std::fmt;

use rosc::{OscMessage, OscPacket, OscType};
use tracing::debug;

use crate::error::{OscSendError, Result};
use crate::general::cast::{cast, TypeTag, TypedArgument};
use crate::general::infer::infer;

/// An OSC address plus its typed arguments, in command-line order.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    path: String,
    args: Vec<TypedArgument>,
}

impl Message {
    pub fn new(path: &str, args: Vec<TypedArgument>) -> Result<Self> {
        if path.is_empty() {
            return Err(OscSendError::EmptyAddress);
        }
        Ok(Message {
            path: path.to_string(),
            args,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn args(&self) -> &[TypedArgument] {
        &self.args
    }

    /// The type tag string without the leading comma.
    pub fn type_tags(&self) -> String {
        self.args.iter().map(TypedArgument::tag).collect()
    }

    pub fn to_packet(&self) -> OscPacket {
        OscPacket::Message(OscMessage {
            addr: self.path.clone(),
            args: self.args.iter().cloned().map(OscType::from).collect(),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ,{}", self.path, self.type_tags())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build a message from command-line tokens.
///
/// With `type_tags` every token is cast to its positional tag and the tag
/// count must equal the token count. Without it each token's type is
/// inferred. Nothing is returned unless every argument converted.
pub fn assemble(path: &str, tokens: &[String], type_tags: Option<&str>) -> Result<Message> {
    let args = match type_tags {
        Some(tags) => {
            let tag_count = tags.chars().count();
            if tag_count != tokens.len() {
                return Err(OscSendError::ArityMismatch {
                    tags: tag_count,
                    tokens: tokens.len(),
                });
            }
            let mut args = Vec::with_capacity(tokens.len());
            for (token, c) in tokens.iter().zip(tags.chars()) {
                let tag = TypeTag::try_from(c)?;
                if !tag.carries_payload() && !token.is_empty() {
                    debug!("ignoring value '{}' for type tag '{}'", token, c);
                }
                args.push(cast(token, tag)?);
            }
            args
        }
        None => tokens.iter().map(|t| infer(t)).collect(),
    };
    Message::new(path, args)
}
