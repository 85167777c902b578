/// `javascript/inline-module`: CommonJS module with a separate export per token.
use super::writer::{escape_js, CodeWriter};
use crate::header::FileHeader;
use crate::token::Dictionary;

const ES_MODULE_PREAMBLE: [&str; 2] = [
    "\"use strict\";",
    "Object.defineProperty(exports, \"__esModule\", { value: true });",
];

pub fn format_inline_module(dictionary: &Dictionary, header: &FileHeader) -> String {
    let mut w = CodeWriter::new();
    w.raw(&header.render());
    for line in ES_MODULE_PREAMBLE {
        w.line(line);
    }
    w.blank();
    for token in &dictionary.all_tokens {
        w.line(&format!(
            "exports.{} = \"{}\";",
            token.name,
            escape_js(&token.value)
        ));
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_exports_in_order() {
        let dict = Dictionary::new(vec![
            Token::new("b", "2", vec!["b".into()]),
            Token::new("a", "1", vec!["a".into()]),
        ]);
        let out = format_inline_module(&dict, &FileHeader::new(["x", "y"]));
        assert_eq!(
            out,
            "// x\n// y\n\n\
             \"use strict\";\n\
             Object.defineProperty(exports, \"__esModule\", { value: true });\n\n\
             exports.b = \"2\";\n\
             exports.a = \"1\";\n"
        );
    }

    #[test]
    fn test_empty_dictionary_keeps_preamble() {
        let out = format_inline_module(&Dictionary::default(), &FileHeader::new(["h"]));
        assert_eq!(
            out,
            "// h\n\n\"use strict\";\n\
             Object.defineProperty(exports, \"__esModule\", { value: true });\n\n"
        );
    }
}
