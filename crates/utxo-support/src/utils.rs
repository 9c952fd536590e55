use bitcoin::consensus::{deserialize_partial, encode, Decodable};
use std::io::{BufRead, Cursor};

/// Decodes one consensus-encoded value at the cursor and advances past it.
pub fn consensus_decode<T: Decodable>(
    cursor: &mut Cursor<&[u8]>,
) -> std::result::Result<T, encode::Error> {
    let (value, consumed) = deserialize_partial::<T>(remaining_slice(cursor))?;
    cursor.consume(consumed);
    Ok(value)
}

pub fn remaining_slice<'a>(cursor: &Cursor<&'a [u8]>) -> &'a [u8] {
    let data: &'a [u8] = *cursor.get_ref();
    let position = (cursor.position() as usize).min(data.len());
    &data[position..]
}

/// True when a decode failed only because the input ran out.
pub fn is_eof(err: &encode::Error) -> bool {
    matches!(err, encode::Error::Io(e) if e.kind() == bitcoin::io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::consensus::encode::VarInt;

    #[test]
    fn test_consensus_decode_advances() {
        let data = [0xfd, 0x01, 0x02, 0x07];
        let mut cursor = Cursor::new(&data[..]);
        let first: VarInt = consensus_decode(&mut cursor).unwrap();
        assert_eq!(first.0, 0x0201);
        assert_eq!(remaining_slice(&cursor), &[0x07]);
        let second: VarInt = consensus_decode(&mut cursor).unwrap();
        assert_eq!(second.0, 7);
        assert!(remaining_slice(&cursor).is_empty());
    }

    #[test]
    fn test_eof_is_detected() {
        let data = [0xfe, 0x01];
        let mut cursor = Cursor::new(&data[..]);
        let err = consensus_decode::<VarInt>(&mut cursor).unwrap_err();
        assert!(is_eof(&err));
        assert_eq!(cursor.position(), 0);
    }
}
