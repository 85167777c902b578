/// `typescript/basic`: one `export declare const` per token, typed by its literal value.
use super::writer::{escape_js, CodeWriter};
use crate::header::FileHeader;
use crate::token::Dictionary;

pub fn format_basic_ts(dictionary: &Dictionary, header: &FileHeader) -> String {
    let mut w = CodeWriter::new();
    w.raw(&header.render());
    for token in &dictionary.all_tokens {
        w.line(&format!(
            "export declare const {} = \"{}\";",
            token.name,
            escape_js(&token.value)
        ));
    }
    w.finish()
}
