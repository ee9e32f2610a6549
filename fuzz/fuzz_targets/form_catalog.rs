#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let dom = html::parse_document(&input);
    for mut form in forms::forms_in(&dom) {
        let names: Vec<String> = form.fields().map(str::to_string).collect();
        for name in &names {
            let _ = form.set(name, "x");
            let _ = form.check(name);
            let _ = form.select_by_option_value(name, &[""]);
        }
        // Every active field must show up in the data set under its own name.
        let data_set = form.data_set();
        for name in &names {
            let active = form.state().contains(name);
            assert_eq!(active, data_set.iter().any(|(n, _)| n == name));
        }
        let _ = form.submission_for_submit().encode();
    }
});
