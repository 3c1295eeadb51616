use std::io::{Read, Write};

use bufser_channel::{
    decode_sequence, decode_text, encode_sequence, encode_text, ChannelReader, ChannelWriter,
    Decode, Encode, Result,
};
use serde::Serialize;

/// The record the CLI writes and reads back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: String,
    pub values: Vec<i32>,
    pub scale: f32,
    pub tag: i32,
}

impl Encode for Sample {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_text(writer, &self.name)?;
        encode_sequence(writer, &self.values)?;
        self.scale.encode(writer)?;
        self.tag.encode(writer)
    }
}

impl Decode for Sample {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        Ok(Self {
            name: decode_text(reader)?,
            values: decode_sequence(reader)?,
            scale: f32::decode(reader)?,
            tag: i32::decode(reader)?,
        })
    }
}

pub fn sample_records() -> Vec<Sample> {
    vec![
        Sample {
            name: "Hello".to_string(),
            values: vec![1, 2, 3, 4],
            scale: 10.0,
            tag: 1,
        },
        Sample {
            name: "World".to_string(),
            values: vec![7, 7, 7],
            scale: 20.0,
            tag: 2,
        },
    ]
}
