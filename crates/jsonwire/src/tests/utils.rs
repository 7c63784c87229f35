//! Shared helper codecs for the test suite.

use std::collections::BTreeMap;

use crate::{JsonReader, JsonReaderError, JsonValueCodec, JsonWriter, JsonWriterError};

macro_rules! simple_codec {
    ($name:ident, $ty:ty, $null:expr, $read:ident, $write:ident) => {
        pub struct $name;

        impl JsonValueCodec for $name {
            type Value = $ty;

            fn decode_value(
                &self,
                reader: &mut JsonReader<'_>,
                _default: $ty,
            ) -> Result<$ty, JsonReaderError> {
                reader.$read()
            }

            fn encode_value(
                &self,
                x: &$ty,
                writer: &mut JsonWriter<'_>,
            ) -> Result<(), JsonWriterError> {
                writer.$write(*x)
            }

            fn null_value(&self) -> $ty {
                $null
            }
        }
    };
}

simple_codec!(BoolCodec, bool, false, read_boolean, write_bool);
simple_codec!(I64Codec, i64, 0, read_i64, write_i64);
simple_codec!(U64Codec, u64, 0, read_u64, write_u64);
simple_codec!(F64Codec, f64, 0.0, read_f64, write_f64);
simple_codec!(F32Codec, f32, 0.0, read_f32, write_f32);

pub struct StringCodec;

impl JsonValueCodec for StringCodec {
    type Value = String;

    fn decode_value(
        &self,
        reader: &mut JsonReader<'_>,
        default: String,
    ) -> Result<String, JsonReaderError> {
        if reader.is_next_token(b'n')? {
            return reader.read_null_or_error(default, "expected string value or null");
        }
        reader.rollback_token()?;
        reader.read_string()
    }

    fn encode_value(&self, x: &String, writer: &mut JsonWriter<'_>) -> Result<(), JsonWriterError> {
        writer.write_string(x)
    }

    fn null_value(&self) -> String {
        String::new()
    }
}

/// The two-level mapping shape of the nested-map decoding scenario.
#[derive(Debug, Default, PartialEq)]
pub struct NestedMaps {
    pub m: BTreeMap<String, f64>,
    pub mm: BTreeMap<i32, BTreeMap<i32, f64>>,
}

pub struct NestedMapsCodec;

impl NestedMapsCodec {
    fn decode_inner(reader: &mut JsonReader<'_>) -> Result<BTreeMap<i32, f64>, JsonReaderError> {
        let mut map = BTreeMap::new();
        if !reader.is_next_token(b'{')? {
            return Err(reader.decode_error("expected '{'"));
        }
        if reader.is_next_token(b'}')? {
            return Ok(map);
        }
        reader.rollback_token()?;
        loop {
            let key = reader.read_key_as_i32()?;
            map.insert(key, reader.read_f64()?);
            if !reader.is_next_token(b',')? {
                break;
            }
        }
        if !reader.is_current_token(b'}')? {
            return Err(reader.decode_error("expected '}' or ','"));
        }
        Ok(map)
    }

    fn encode_inner(
        map: &BTreeMap<i32, f64>,
        writer: &mut JsonWriter<'_>,
    ) -> Result<(), JsonWriterError> {
        writer.write_object_start()?;
        for (k, v) in map {
            writer.write_key_as_i32(*k)?;
            writer.write_f64(*v)?;
        }
        writer.write_object_end()
    }
}

impl JsonValueCodec for NestedMapsCodec {
    type Value = NestedMaps;

    fn decode_value(
        &self,
        reader: &mut JsonReader<'_>,
        _default: NestedMaps,
    ) -> Result<NestedMaps, JsonReaderError> {
        let mut out = NestedMaps::default();
        if !reader.is_next_token(b'{')? {
            return Err(reader.decode_error("expected '{'"));
        }
        if reader.is_next_token(b'}')? {
            return Ok(out);
        }
        reader.rollback_token()?;
        loop {
            match reader.read_key()?.as_str() {
                "m" => {
                    if !reader.is_next_token(b'{')? {
                        return Err(reader.decode_error("expected '{'"));
                    }
                    if !reader.is_next_token(b'}')? {
                        reader.rollback_token()?;
                        loop {
                            let key = reader.read_key()?;
                            out.m.insert(key, reader.read_f64()?);
                            if !reader.is_next_token(b',')? {
                                break;
                            }
                        }
                        if !reader.is_current_token(b'}')? {
                            return Err(reader.decode_error("expected '}' or ','"));
                        }
                    }
                }
                "mm" => {
                    if !reader.is_next_token(b'{')? {
                        return Err(reader.decode_error("expected '{'"));
                    }
                    if !reader.is_next_token(b'}')? {
                        reader.rollback_token()?;
                        loop {
                            let key = reader.read_key_as_i32()?;
                            out.mm.insert(key, Self::decode_inner(reader)?);
                            if !reader.is_next_token(b',')? {
                                break;
                            }
                        }
                        if !reader.is_current_token(b'}')? {
                            return Err(reader.decode_error("expected '}' or ','"));
                        }
                    }
                }
                name => return Err(reader.unexpected_key_error(name)),
            }
            if !reader.is_next_token(b',')? {
                break;
            }
        }
        if !reader.is_current_token(b'}')? {
            return Err(reader.decode_error("expected '}' or ','"));
        }
        Ok(out)
    }

    fn encode_value(
        &self,
        x: &NestedMaps,
        writer: &mut JsonWriter<'_>,
    ) -> Result<(), JsonWriterError> {
        writer.write_object_start()?;
        writer.write_key("m")?;
        writer.write_object_start()?;
        for (k, v) in &x.m {
            writer.write_key(k)?;
            writer.write_f64(*v)?;
        }
        writer.write_object_end()?;
        writer.write_key("mm")?;
        writer.write_object_start()?;
        for (k, v) in &x.mm {
            writer.write_key_as_i32(*k)?;
            Self::encode_inner(v, writer)?;
        }
        writer.write_object_end()?;
        writer.write_object_end()
    }

    fn null_value(&self) -> NestedMaps {
        NestedMaps::default()
    }
}
