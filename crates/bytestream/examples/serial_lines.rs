//! Pulls NMEA sentences out of a GPS receiver's UART feed.
//!
//! A UART interrupt hands the driver whatever bytes the hardware FIFO held,
//! so sentence boundaries land anywhere inside a burst. The driver writes each
//! burst into a [`ByteStream`]; the parser side pulls complete lines out as
//! soon as they are buffered and leaves partial sentences for the next burst.
//!
//! When a burst does not fit (the parser fell behind), the burst is dropped
//! whole rather than half-written, and the parser resynchronizes on the next
//! line terminator.
//!
//! Run with
//!
//! ```bash
//! cargo run -p bytestream --example serial_lines
//! ```

use bytestream::{ByteStream, ByteStreamError};

fn main() {
    let bursts: [&[u8]; 6] = [
        b"$GPGGA,123519,4807.038,N,01131.0",
        b"00,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n$GPR",
        b"MC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        b"\r\n",
        b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n$GPGSA,A,3,04",
        b",05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n",
    ];

    let mut stream = ByteStream::with_capacity(128).expect("allocate stream");
    let mut line = [0u8; 96];

    for burst in bursts {
        if let Err(err) = stream.write(burst) {
            eprintln!("dropping {} byte burst: {err}", burst.len());
            continue;
        }

        loop {
            match stream.read_line(&mut line) {
                Ok(len) => {
                    let sentence = String::from_utf8_lossy(&line[..len as usize]);
                    println!("{}", sentence.trim_end());
                }
                Err(ByteStreamError::NoEol) => break,
                Err(ByteStreamError::BufferTooSmall { required, .. }) => {
                    eprintln!("discarding oversized {required} byte line");
                    stream.skip(required).expect("line is buffered");
                }
                Err(err) => panic!("unexpected stream error: {err}"),
            }
        }
    }

    println!("{:?}", stream.status());
}
