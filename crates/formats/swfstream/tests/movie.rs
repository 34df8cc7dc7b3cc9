mod common;

use common::{action, body_header, cws, fws, sprite, StreamBuilder};
use swfstream::avm1::{Opcode, Operand, Value};
use swfstream::header::Compression;
use swfstream::{DecodeOptions, Error, Movie, Registries, Tag};

fn sample_body() -> Vec<u8> {
    let mut frame_script = Vec::new();
    let mut push = vec![Value::STRING];
    push.extend_from_slice(b"hi\0");
    frame_script.extend(action(0x96, &push));
    frame_script.push(0x26); // Trace
    frame_script.push(0x07);
    frame_script.push(0x00);

    let mut sprite_script = action(0x81, &[0x01, 0x00]);
    sprite_script.push(0x00);
    let inner = StreamBuilder::new()
        .tag(12, &sprite_script)
        .tag(1, &[])
        .end();

    let mut body = body_header(1);
    body.extend(
        StreamBuilder::new()
            .tag(69, &[0x00, 0x00, 0x00, 0x00])
            .tag(9, &[0xFF, 0xFF, 0xFF])
            .tag(39, &sprite(2, 1, &inner))
            .tag(12, &frame_script)
            .tag(1, &[])
            .end(),
    );
    body
}

fn parse(data: &[u8]) -> swfstream::Result<Movie> {
    Movie::parse(data, &Registries::standard()?, &DecodeOptions::default())
}

#[test]
fn uncompressed_movie() {
    let data = fws(8, &sample_body());
    let movie = parse(&data).unwrap();

    assert_eq!(movie.header.compression, Compression::None);
    assert_eq!(movie.header.version, 8);
    assert_eq!(movie.header.file_length as usize, data.len());
    assert_eq!(movie.header.frame_size.width_px(), 550.0);
    assert_eq!(movie.header.frames_per_second(), 24.0);
    assert_eq!(movie.header.frame_count, 1);

    let kinds: Vec<&str> = movie.tags.iter().map(|t| t.tag.name()).collect();
    assert_eq!(
        kinds,
        [
            "FileAttributes",
            "SetBackgroundColor",
            "DefineSprite",
            "DoAction",
            "ShowFrame"
        ]
    );
    // Offsets count from the start of the file, prefix and header included.
    assert_eq!(movie.tags[0].header.offset, 8 + 13);
}

#[test]
fn compressed_movie_matches_uncompressed() {
    let body = sample_body();
    let plain = parse(&fws(8, &body)).unwrap();
    let packed = parse(&cws(8, &body)).unwrap();

    assert_eq!(packed.header.compression, Compression::Zlib);
    assert_eq!(packed.tags, plain.tags);
    assert_eq!(packed.header.frame_size, plain.header.frame_size);
}

#[test]
fn streamed_and_in_memory_decodes_agree() {
    let registries = Registries::standard().unwrap();
    let options = DecodeOptions::default();
    for data in [fws(8, &sample_body()), cws(8, &sample_body())] {
        let in_memory = Movie::parse(&data, &registries, &options).unwrap();
        let streamed =
            Movie::from_reader(std::io::Cursor::new(&data), &registries, &options).unwrap();
        assert_eq!(in_memory, streamed);
    }
}

#[test]
fn actions_walk_into_sprites() {
    let movie = parse(&fws(8, &sample_body())).unwrap();
    let actions = movie.actions();
    let summary: Vec<(u16, Option<Opcode>)> = actions
        .iter()
        .map(|(tag, a)| (tag.header.code, a.name()))
        .collect();
    assert_eq!(
        summary,
        [
            (12, Some(Opcode::GotoFrame)),
            (12, Some(Opcode::Push)),
            (12, Some(Opcode::Trace)),
            (12, Some(Opcode::Stop)),
        ]
    );
    assert_eq!(
        actions[1].1.operand,
        Operand::Push(vec![Value::String("hi".into())])
    );
    let Tag::DefineSprite(s) = &movie.tags[2].tag else {
        panic!("expected sprite");
    };
    assert!(std::ptr::eq(actions[0].0, &s.tags[0]));
}

#[test]
fn truncated_body_underflows() {
    let mut data = fws(8, &sample_body());
    data.truncate(data.len() - 3);
    assert!(matches!(parse(&data), Err(Error::BufferUnderflow { .. })));
}

#[test]
fn file_length_mismatch_is_tolerated() {
    let mut data = fws(8, &sample_body());
    data[4] = data[4].wrapping_add(1);
    let movie = parse(&data).unwrap();
    assert_eq!(movie.tags.len(), 5);
}

#[test]
fn bad_signatures() {
    let mut data = fws(8, &sample_body());
    data[..3].copy_from_slice(b"ZWS");
    assert!(matches!(
        parse(&data),
        Err(Error::UnsupportedCompression { .. })
    ));
    data[..3].copy_from_slice(b"XYZ");
    assert!(matches!(parse(&data), Err(Error::InvalidSignature { .. })));
}

#[test]
fn movie_serializes_to_json() {
    let movie = parse(&fws(8, &sample_body())).unwrap();
    let json = serde_json::to_value(&movie).unwrap();
    assert_eq!(json["header"]["version"], 8);
    assert_eq!(json["tags"].as_array().unwrap().len(), 5);
}
