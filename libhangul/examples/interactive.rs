use libhangul::{
    Capabilities, HangulConfig, HangulEngine, HanjaDictionary, HanjaTable, HostContext, Key,
    KeyEvent, KeySym,
};
use std::io::{self, BufRead};

const IC: u64 = 1;

fn build_demo_dictionary() -> HanjaDictionary {
    // Try a real table first when given on the command line.
    if let Some(path) = std::env::args().nth(1) {
        match HanjaDictionary::load(&path, None) {
            Ok(dict) => {
                println!("loaded hanja table from '{}'", path);
                return dict;
            }
            Err(e) => eprintln!("warning: failed to load '{}': {:#}", path, e),
        }
    }

    // Fallback: small built-in demo table.
    let mut table = HanjaTable::new();
    table.insert("한", "韓");
    table.insert("한", "漢");
    table.insert("한국", "韓國");
    table.insert("국", "國");
    table.insert("수도", "首都");
    table.insert("대", "大");
    table.insert("대한", "大韓");
    HanjaDictionary::new(table, None)
}

fn show_state(engine: &HangulEngine, host: &mut HostContext) {
    let commit = host.take_commit();
    if !commit.is_empty() {
        println!("  commit: {}", commit);
    }
    if let Some(delete) = host.surrounding_delete.take() {
        println!(
            "  delete surrounding: offset {} len {}",
            delete.offset, delete.len
        );
    }
    if let Some(preedit) = &host.preedit {
        println!("  preedit: [{}]{}", preedit.decided, preedit.composing);
    }
    if let Some(candidates) = &host.candidates {
        println!(
            "  candidates (page {}/{}):",
            candidates.page + 1,
            candidates.page_count
        );
        for (i, value) in candidates.entries.iter().enumerate() {
            let marker = if i == candidates.cursor { ">" } else { " " };
            println!("   {} {}. {}", marker, i + 1, value);
        }
    }
    if let Some(session) = engine.session(IC) {
        if session.candidate_list().is_none() && host.preedit.is_none() {
            println!("  (idle)");
        }
    }
}

fn main() {
    let mut config = HangulConfig::default();
    config.hanja_mode = true;
    let mut engine = HangulEngine::with_dictionary(config, build_demo_dictionary());
    let mut host = HostContext::new(Capabilities::SURROUNDING_TEXT | Capabilities::PREEDIT);

    println!("libhangul demo CLI — type dubeolsik QWERTY letters and press Enter");
    println!("commands: :hanja (toggle key), :bs (backspace), :enter, :flush, :reset");
    println!("digits 1-9,0 select candidates. Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(raw) = line else { break };
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ":hanja" => {
                engine.key_event(IC, &KeyEvent::press(Key::new(KeySym::Hanja)), &mut host);
            }
            ":bs" => {
                engine.key_event(IC, &KeyEvent::press(Key::new(KeySym::Backspace)), &mut host);
            }
            ":enter" => {
                engine.key_event(IC, &KeyEvent::press(Key::new(KeySym::Return)), &mut host);
            }
            ":flush" => engine.flush(IC, &mut host),
            ":reset" => engine.reset(IC, &mut host),
            _ => {
                for ch in input.chars() {
                    let consumed = engine.key_event(
                        IC,
                        &KeyEvent::press(Key::new(KeySym::Char(ch))),
                        &mut host,
                    );
                    if !consumed {
                        println!("  (key '{}' passed through)", ch);
                    }
                }
            }
        }
        show_state(&engine, &mut host);
        println!();
    }
}
