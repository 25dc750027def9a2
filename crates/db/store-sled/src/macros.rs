#[macro_export]
macro_rules! define_table_without_codec {
    ($(#[$docs:meta])+ ( $table_name:ident ) $key:ty => $value:ty) => {
        $(#[$docs])+
        ///
        #[doc = concat!("Takes [`", stringify!($key), "`] as a key and returns [`", stringify!($value), "`]")]
        #[derive(Clone, Copy, Debug, Default)]
        pub(crate) struct $table_name;

        impl ::typed_sled::Schema for $table_name {
            const TREE_NAME: ::typed_sled::schema::TreeName = ::typed_sled::schema::TreeName($table_name::tree_name());
            type Key = $key;
            type Value = $value;
        }

        impl $table_name {
            const fn tree_name() -> &'static str {
                ::core::stringify!($table_name)
            }
        }

        impl ::std::fmt::Display for $table_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::core::write!(f, "{}", stringify!($table_name))
            }
        }
    };
}

/// Fixed-width big-endian encoding for keys, so that sled iterates them in
/// the natural order of their fields.
pub(crate) mod lexicographic {
    use std::str;

    use anyhow::anyhow;
    use tokenbridge_primitives::{
        receipt::ReceiptId, standard::TokenStandard, supply::SupplyKey, Address, U256,
    };

    /// Trait for types that can be encoded and decoded lexicographically.
    pub(crate) trait LexicographicKey: Sized {
        fn encode_lexicographic(&self, out: &mut Vec<u8>);
        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self>;
    }

    /// Encode a lexicographic key into bytes.
    pub(crate) fn encode_key<T: LexicographicKey>(value: &T) -> Vec<u8> {
        let mut out = Vec::new();
        value.encode_lexicographic(&mut out);
        out
    }

    /// Decode a lexicographic key from bytes.
    pub(crate) fn decode_key<T: LexicographicKey>(data: &[u8]) -> anyhow::Result<T> {
        let mut remaining = data;
        let value = T::decode_lexicographic(&mut remaining)?;
        if !remaining.is_empty() {
            return Err(anyhow!("lexicographic key has trailing bytes"));
        }
        Ok(value)
    }

    fn read_exact<const N: usize>(data: &mut &[u8]) -> anyhow::Result<[u8; N]> {
        if data.len() < N {
            return Err(anyhow!(
                "lexicographic key underflow: need {N} bytes, got {}",
                data.len()
            ));
        }
        let (prefix, rest) = data.split_at(N);
        *data = rest;
        let mut out = [0u8; N];
        out.copy_from_slice(prefix);
        Ok(out)
    }

    fn read_u8(data: &mut &[u8]) -> anyhow::Result<u8> {
        Ok(read_exact::<1>(data)?[0])
    }

    impl LexicographicKey for Address {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(self.as_slice());
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            Ok(Address::new(read_exact::<20>(data)?))
        }
    }

    impl LexicographicKey for U256 {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.to_be_bytes::<32>());
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            Ok(U256::from_be_bytes(read_exact::<32>(data)?))
        }
    }

    impl LexicographicKey for TokenStandard {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            out.push(self.tag());
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            let tag = read_u8(data)?;
            TokenStandard::from_tag(tag).ok_or_else(|| anyhow!("unknown TokenStandard tag {tag}"))
        }
    }

    /// Trailing field only: it consumes the rest of the input.
    impl LexicographicKey for ReceiptId {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(self.as_str().as_bytes());
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            let id = str::from_utf8(data)
                .map_err(|e| anyhow!("receipt id is not utf-8: {e}"))?
                .to_owned();
            *data = &[];
            Ok(ReceiptId::new(id))
        }
    }

    impl<T: LexicographicKey> LexicographicKey for Option<T> {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            match self {
                None => out.push(0),
                Some(value) => {
                    out.push(1);
                    value.encode_lexicographic(out);
                }
            }
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            match read_u8(data)? {
                0 => Ok(None),
                1 => Ok(Some(T::decode_lexicographic(data)?)),
                tag => Err(anyhow!("unknown Option tag {tag}")),
            }
        }
    }

    // The aggregate counter (`None`) sorts before every instance of the same
    // local token.
    impl LexicographicKey for SupplyKey {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            self.local_token.encode_lexicographic(out);
            self.instance_id.encode_lexicographic(out);
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            let local_token = Address::decode_lexicographic(data)?;
            let instance_id = Option::<U256>::decode_lexicographic(data)?;
            Ok(SupplyKey::new(local_token, instance_id))
        }
    }

    impl<A, B> LexicographicKey for (A, B)
    where
        A: LexicographicKey,
        B: LexicographicKey,
    {
        fn encode_lexicographic(&self, out: &mut Vec<u8>) {
            self.0.encode_lexicographic(out);
            self.1.encode_lexicographic(out);
        }

        fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
            let first = A::decode_lexicographic(data)?;
            let second = B::decode_lexicographic(data)?;
            Ok((first, second))
        }
    }

}

/// Defines a table whose key is encoded with [`lexicographic`] and whose
/// value is encoded with borsh.
#[macro_export]
macro_rules! define_table_with_seek_key_codec {
    ($(#[$docs:meta])+ ($table_name:ident) $key:ty => $value:ty) => {
        $crate::define_table_without_codec!($(#[$docs])+ ( $table_name ) $key => $value);

        $crate::impl_lexicographic_key_codec!($table_name, $key);
        $crate::impl_borsh_value_codec!($table_name, $value);
    };
}

#[macro_export]
macro_rules! impl_lexicographic_key_codec {
    ($table_name:ident, $key:ty) => {
        impl ::typed_sled::codec::KeyCodec<$table_name> for $key {
            fn encode_key(&self) -> ::std::result::Result<::std::vec::Vec<u8>, ::typed_sled::codec::CodecError> {
                Ok($crate::macros::lexicographic::encode_key(self))
            }

            fn decode_key(data: &[u8]) -> ::std::result::Result<Self, ::typed_sled::codec::CodecError> {
                $crate::macros::lexicographic::decode_key(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::SerializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

/// Values that are themselves plain keys, e.g. index entries pointing at
/// another table.
#[macro_export]
macro_rules! impl_lexicographic_value_codec {
    ($table_name:ident, $value:ty) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for $value {
            fn encode_value(&self) -> ::std::result::Result<::std::vec::Vec<u8>, ::typed_sled::codec::CodecError> {
                Ok($crate::macros::lexicographic::encode_key(self))
            }

            fn decode_value(data: &[u8]) -> ::std::result::Result<Self, ::typed_sled::codec::CodecError> {
                $crate::macros::lexicographic::decode_key(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::SerializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

#[macro_export]
macro_rules! impl_borsh_value_codec {
    ($table_name:ident, $value:ty) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for $value {
            fn encode_value(
                &self,
            ) -> ::std::result::Result<::std::vec::Vec<u8>, ::typed_sled::codec::CodecError> {
                ::borsh::to_vec(self).map_err(|err| {
                    ::typed_sled::codec::CodecError::SerializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }

            fn decode_value(
                data: &[u8],
            ) -> ::std::result::Result<Self, ::typed_sled::codec::CodecError> {
                ::borsh::from_slice(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::SerializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

#[macro_export]
macro_rules! sled_db_test_setup {
    ($db_type:ty, $test_macro:ident) => {
        fn setup_db() -> $db_type {
            let db = sled::Config::new().temporary(true).open().unwrap();
            let sled_db = typed_sled::SledDb::new(db).unwrap();
            let config = $crate::SledDbConfig::test();
            <$db_type>::new(sled_db.into(), config).unwrap()
        }

        $test_macro!(setup_db());
    };
}

#[macro_export]
macro_rules! define_sled_database {
    (
        $(#[$meta:meta])*
        pub struct $db_name:ident {
            $($vis:vis $field:ident: $schema:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $db_name {
            $(
                $vis $field: typed_sled::SledTree<$schema>,
            )*
            #[allow(dead_code, clippy::allow_attributes, reason = "some generated code is not used")]
            config: $crate::SledDbConfig,
        }

        impl $db_name {
            pub fn new(db: std::sync::Arc<typed_sled::SledDb>, config: $crate::SledDbConfig) -> tokenbridge_db_types::DbResult<Self> {
                Ok(Self {
                    $(
                        $field: db.get_tree()?,
                    )*
                    config,
                })
            }
        }
    };
}
