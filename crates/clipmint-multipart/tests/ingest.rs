//! End-to-end ingestion behaviour over synthetic request bodies.

use bytes::Bytes;
use clipmint_multipart::{
    parse, parse_with_content_type, IngestError, MalformedMultipart, FALLBACK_VIDEO_MEDIA_TYPE,
    FALLBACK_VIDEO_NAME,
};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};

const BOUNDARY: &str = "----clipmintFormBoundary9f2c";

struct TestFile<'a> {
    field: &'a str,
    filename: &'a str,
    media_type: &'a str,
    data: &'a [u8],
}

/// Encode fields and files the way a browser would.
fn encode(boundary: &str, fields: &[(&str, &str)], files: &[TestFile<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for file in files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.field, file.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.media_type).as_bytes());
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn multipart_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&format!("multipart/form-data; boundary={BOUNDARY}"))
            .expect("header value"),
    );
    headers
}

/// Payloads chosen to look like framing: line breaks, dashes, and a
/// boundary prefix that does not start a line.
fn payload(seed: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..=255u8).cycle().skip(seed * 7).take(64 + seed * 31).collect();
    data.extend_from_slice(b"\r\n--\r\n\n");
    data.extend_from_slice(format!("x--{BOUNDARY}").as_bytes());
    data
}

#[test]
fn counts_match_for_every_mix_of_fields_and_files() {
    for n_files in 0..4 {
        for n_fields in 0..4 {
            let field_names: Vec<String> = (0..n_fields).map(|i| format!("field{i}")).collect();
            let field_values: Vec<String> = (0..n_fields).map(|i| format!("value {i}\nline")).collect();
            let fields: Vec<(&str, &str)> = field_names
                .iter()
                .zip(&field_values)
                .map(|(n, v)| (n.as_str(), v.as_str()))
                .collect();

            let file_names: Vec<String> = (0..n_files).map(|i| format!("file{i}")).collect();
            let payloads: Vec<Vec<u8>> = (0..n_files).map(payload).collect();
            let files: Vec<TestFile<'_>> = file_names
                .iter()
                .zip(&payloads)
                .map(|(name, data)| TestFile {
                    field: name,
                    filename: "clip.mp4",
                    media_type: "video/mp4",
                    data,
                })
                .collect();

            let body = Bytes::from(encode(BOUNDARY, &fields, &files));
            let ingestion = parse(&multipart_headers(), body).expect("multipart accepted");
            assert!(
                !ingestion.is_degraded(),
                "{n_files} files / {n_fields} fields degraded: {:?}",
                ingestion.degradation()
            );

            let upload = ingestion.upload();
            assert_eq!(upload.files().len(), n_files);
            assert_eq!(upload.fields().len(), n_fields);
            for file in upload.files().values() {
                assert_eq!(file.byte_length(), file.data().len());
            }
        }
    }
}

#[test]
fn round_trip_preserves_values_and_bytes() {
    let metadata = r#"{"title":"Kickflip","tags":["skate","slowmo"]}"#;
    let video = payload(5);
    let thumb = payload(2);
    let fields = [("metadata", metadata), ("title", "Kickflip — take 3")];
    let files = [
        TestFile {
            field: "video",
            filename: "kickflip.webm",
            media_type: "video/webm",
            data: &video,
        },
        TestFile {
            field: "thumbnail",
            filename: "thumb.png",
            media_type: "image/png",
            data: &thumb,
        },
    ];

    let body = Bytes::from(encode(BOUNDARY, &fields, &files));
    let upload = parse(&multipart_headers(), body)
        .expect("multipart accepted")
        .into_upload();

    for (name, value) in fields {
        assert_eq!(upload.field(name), Some(value));
    }
    for file in &files {
        let part = upload.file(file.field).expect("file part present");
        assert_eq!(part.name(), file.filename);
        assert_eq!(part.media_type(), file.media_type);
        assert_eq!(part.data().as_ref(), file.data);
    }
}

#[test]
fn title_and_clip_scenario() {
    let body = Bytes::from(encode(
        BOUNDARY,
        &[("title", "Hello")],
        &[TestFile {
            field: "video",
            filename: "clip.mp4",
            media_type: "video/mp4",
            data: &[0x00, 0x01, 0x02],
        }],
    ));

    let upload = parse(&multipart_headers(), body)
        .expect("multipart accepted")
        .into_upload();

    assert_eq!(upload.fields().len(), 1);
    assert_eq!(upload.field("title"), Some("Hello"));
    assert_eq!(upload.files().len(), 1);
    let video = upload.file("video").expect("video");
    assert_eq!(video.name(), "clip.mp4");
    assert_eq!(video.media_type(), "video/mp4");
    assert_eq!(video.byte_length(), 3);
    assert_eq!(video.data().as_ref(), &[0u8, 1, 2]);
}

#[test]
fn truncated_body_falls_back_to_raw_video() {
    let full = encode(
        BOUNDARY,
        &[("metadata", "{\"a\":1}")],
        &[TestFile {
            field: "video",
            filename: "clip.mp4",
            media_type: "video/mp4",
            data: &payload(3),
        }],
    );
    // Cut inside the closing delimiter.
    let cut = full.len() - BOUNDARY.len() / 2 - 4;
    let truncated = Bytes::copy_from_slice(&full[..cut]);

    let ingestion = parse(&multipart_headers(), truncated.clone()).expect("multipart accepted");
    assert!(ingestion.is_degraded());
    assert!(matches!(
        ingestion.degradation().map(|d| d.cause()),
        Some(MalformedMultipart::Truncated { .. })
    ));

    let upload = ingestion.upload();
    assert_eq!(upload.fields().len(), 1);
    assert_eq!(upload.field("metadata"), Some("{}"));
    assert_eq!(upload.files().len(), 1);
    let video = upload.file("video").expect("video");
    assert_eq!(video.name(), FALLBACK_VIDEO_NAME);
    assert_eq!(video.media_type(), FALLBACK_VIDEO_MEDIA_TYPE);
    assert_eq!(video.byte_length(), truncated.len());
    assert_eq!(video.data(), &truncated);
}

#[test]
fn bodies_without_a_delimiter_fall_back() {
    let bodies: [&[u8]; 4] = [
        b"",
        b"\x00\x00\x00\x18ftypmp42",
        b"--other-boundary\r\n\r\nx\r\n--other-boundary--",
        b"-",
    ];
    for raw in bodies {
        let body = Bytes::from_static(raw);
        let ingestion = parse(&multipart_headers(), body.clone()).expect("multipart accepted");
        assert!(ingestion.is_degraded());
        let upload = ingestion.upload();
        assert_eq!(upload.files().len(), 1);
        assert_eq!(upload.file("video").map(|f| f.data()), Some(&body));
    }
}

#[test]
fn non_multipart_requests_are_rejected() {
    for content_type in [None, Some("application/json"), Some("video/mp4"), Some("text/plain")] {
        let result = parse_with_content_type(content_type, Bytes::from_static(b"payload"));
        assert!(
            matches!(result, Err(IngestError::UnsupportedContentType { .. })),
            "{content_type:?} was not rejected"
        );
    }
}

#[test]
fn multipart_without_boundary_is_rejected() {
    for content_type in [
        "multipart/form-data",
        "multipart/form-data;",
        "multipart/form-data; charset=utf-8",
    ] {
        let result = parse_with_content_type(Some(content_type), Bytes::from_static(b"payload"));
        assert!(matches!(result, Err(IngestError::MissingBoundary)));
    }
}

#[test]
fn parsed_files_outlive_the_request_handle() {
    let body = Bytes::from(encode(
        BOUNDARY,
        &[],
        &[TestFile {
            field: "video",
            filename: "clip.mp4",
            media_type: "video/mp4",
            data: b"frames",
        }],
    ));
    let upload = parse(&multipart_headers(), body)
        .expect("multipart accepted")
        .into_upload();
    let (_, mut files) = upload.into_parts();
    let video = files.remove("video").expect("video").into_data();
    assert_eq!(&video[..], b"frames");
}
