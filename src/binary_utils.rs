use std::io::{self, Cursor, Read};

pub fn read_u16_le(cursor: &mut Cursor<&[u8]>) -> io::Result<u16> {
    if cursor.position() + 1 >= cursor.get_ref().len() as u64 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "End of buffer reached or not enough bytes for u16",
        ));
    }

    let mut buf = [0u8; 2];
    cursor.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub fn write_u16_le(data: &mut Vec<u8>, value: u16) {
    data.push((value & 0xFF) as u8);
    data.push(((value >> 8) & 0xFF) as u8);
}
