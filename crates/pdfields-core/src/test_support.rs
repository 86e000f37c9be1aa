//! PDF builders for tests.

use lopdf::encryption::{decrypt_object, get_encryption_key};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Build a PDF with one page per entry; each entry is a list of text lines.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for lines in pages {
        let mut content = String::from("BT /F1 12 Tf 72 720 Td 14 TL ");
        for line in lines.iter() {
            content.push_str(&format!("({}) Tj T* ", line));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08, 0x2E, 0x2E, 0x00,
    0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

/// Same as [`pdf_with_pages`], protected with 40-bit RC4 (standard handler, revision 2)
/// and a user password.
pub fn encrypted_pdf_with_pages(pages: &[&[&str]], password: &str) -> Vec<u8> {
    let mut doc = Document::load_mem(&pdf_with_pages(pages)).unwrap();

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => Object::Integer(2),
        "R" => Object::Integer(2),
        "Length" => Object::Integer(40),
        "P" => Object::Integer(-4),
        "O" => Object::string_literal(vec![0x4F; 32]),
        "CF" => dictionary! {
            "StdCF" => dictionary! { "CFM" => "V2" },
        },
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(b"pdfields-test-id".to_vec()),
            Object::string_literal(b"pdfields-test-id".to_vec()),
        ],
    );

    let key = get_encryption_key(&doc, password, false).unwrap();
    doc.get_object_mut(encrypt_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("U", Object::string_literal(rc4(&key, &PAD_BYTES)));

    // RC4 is symmetric, so decrypting the plain objects encrypts them
    let targets: Vec<ObjectId> = doc
        .objects
        .iter()
        .filter(|(id, obj)| **id != encrypt_id && matches!(obj, Object::String(..) | Object::Stream(_)))
        .map(|(id, _)| *id)
        .collect();
    for id in targets {
        let encrypted = decrypt_object(&key, id, doc.get_object(id).unwrap(), false).unwrap();
        match doc.get_object_mut(id).unwrap() {
            Object::Stream(stream) => stream.set_content(encrypted),
            Object::String(content, _) => *content = encrypted,
            _ => {}
        }
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j = 0u8;
    for i in 0..256 {
        j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            byte ^ s[s[i as usize].wrapping_add(s[j as usize]) as usize]
        })
        .collect()
}
