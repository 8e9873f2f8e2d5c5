use super::*;

fn compile(source: &str) -> TypeflowResult<Script> {
    Compiler::new(TagConfig::default()).compile(source)
}

fn put(count: usize) -> Command {
    Command::Put { count }
}

#[test]
fn plain_text_is_one_put_per_character() {
    let script = compile("plain").unwrap();
    assert_eq!(script.buffer(), "plain");
    assert_eq!(script.attrs().len(), 5);
    assert_eq!(script.commands(), vec![put(1); 5]);
    assert_eq!(script.page_count(), 1);
}

#[test]
fn empty_input_still_yields_one_page() {
    let script = compile("").unwrap();
    assert_eq!(script.page_count(), 1);
    assert_eq!(script.pages()[0], PageSpan::default());
}

#[test]
fn wait_tag_compiles_to_a_pause() {
    let script = compile("<wait=0.5>x").unwrap();
    assert_eq!(
        script.commands(),
        [Command::Wait { seconds: 0.5 }, put(1)]
    );
    assert_eq!(script.buffer(), "x");
}

#[test]
fn speed_tag_inverts_its_factor() {
    let script = compile("<speed=2>").unwrap();
    assert_eq!(script.commands(), [Command::Speed { scale: 0.5 }]);
    assert!(compile("<speed=0>").is_err());
    assert!(compile("<speed=-1>").is_err());
}

#[test]
fn wait_rejects_extra_values() {
    assert!(compile("<wait>").is_err());
    assert!(compile("<wait=1 2>").is_err());
}

#[test]
fn effect_span_marks_enclosed_characters_only() {
    let script = compile("a<quake>bc</quake>d").unwrap();
    let attrs = script.attrs();
    assert_eq!(attrs.len(), 4);
    assert!(attrs[0].quake.is_none());
    assert!(attrs[1].quake.is_some());
    assert!(attrs[2].quake.is_some());
    assert!(attrs[3].quake.is_none());
}

#[test]
fn effect_tags_carry_their_arguments() {
    let script = compile("<quake=0.2,0.4>x</quake>").unwrap();
    let q = script.attrs()[0].quake.unwrap();
    assert_eq!((q.horizontal, q.vertical), (0.2, 0.4));

    let script = compile("<shout=2,0.2,0.8>x</shout>").unwrap();
    let s = script.attrs()[0].shout.unwrap();
    assert_eq!((s.scale, s.grow, s.shrink), (2.0, 0.2, 0.8));

    let script = compile("<fade>x</fade>").unwrap();
    assert!(script.attrs()[0].fade);
}

#[test]
fn effects_stack_independently() {
    let script = compile("<quake><fade>x</fade>y</quake>").unwrap();
    let attrs = script.attrs();
    assert!(attrs[0].quake.is_some() && attrs[0].fade);
    assert!(attrs[1].quake.is_some() && !attrs[1].fade);
}

#[test]
fn unbalanced_effect_tags_are_fatal() {
    assert!(compile("</quake>").is_err());
    assert!(compile("<quake><quake>x</quake>").is_err());
    assert!(compile("<shout>x").is_err());
    assert!(compile("<fade>x").is_err());
}

#[test]
fn unknown_tags_are_fatal() {
    let err = compile("<bogus>").unwrap_err();
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn through_tags_copy_verbatim_without_commands() {
    let mut config = TagConfig::default();
    config.through.insert("color".into());
    let mut compiler = Compiler::new(config);
    let script = compiler.compile("<color=red>a</color>").unwrap();
    assert_eq!(script.buffer(), "<color=red>a</color>");
    assert_eq!(script.attrs().len(), 1);
    assert_eq!(script.commands(), [put(1)]);
}

#[test]
fn callback_tags_compile_to_commands_with_params() {
    let mut config = TagConfig::default();
    config.callback.insert("sfx".into());
    let mut compiler = Compiler::new(config);
    let script = compiler.compile("<sfx=bang>a").unwrap();
    assert_eq!(
        script.commands(),
        [Command::Callback { index: 0 }, put(1)]
    );
    assert_eq!(
        script.callbacks(),
        [CallbackParam {
            name: "sfx".into(),
            value: "bang".into(),
        }]
    );
    assert_eq!(script.buffer(), "a");
    // The close form is not a callback occurrence.
    assert!(compiler.compile("</sfx>").is_err());
}

#[test]
fn entities_decode_into_the_buffer() {
    let script = compile("&lt;&#65;").unwrap();
    assert_eq!(script.buffer(), "<A");
    assert_eq!(script.commands(), vec![put(1); 2]);
}

#[test]
fn ruby_annotation_absorbs_into_the_last_base_character() {
    let script = compile("A<ruby=い>漢</ruby>B").unwrap();
    assert_eq!(script.attrs().len(), 4);
    assert_eq!(script.commands(), [put(1), put(2), put(1)]);
    assert!(script.buffer().contains("<voffset=1em>"));
    assert!(script.buffer().contains("<size=50%>"));
}

#[test]
fn ruby_reveal_covers_multicharacter_bodies() {
    let script = compile("<ruby=かんじ>漢字</ruby>").unwrap();
    assert_eq!(script.attrs().len(), 5);
    assert_eq!(script.commands(), [put(1), put(4)]);
}

#[test]
fn ruby_must_balance() {
    assert!(compile("<ruby=x>y").is_err());
    assert!(compile("</ruby>").is_err());
    assert!(compile("<ruby=a><ruby=b>x</ruby>").is_err());
}

#[test]
fn break_tags_partition_every_array() {
    let script = compile("ab<break>cd").unwrap();
    assert_eq!(script.page_count(), 2);
    let first = script.slice(Some(0)).unwrap();
    let second = script.slice(Some(1)).unwrap();
    assert_eq!(first.text, "ab");
    assert_eq!(second.text, "cd");
    assert_eq!(first.attrs.len() + second.attrs.len(), script.attrs().len());
    assert_eq!(
        first.commands.len() + second.commands.len(),
        script.commands().len()
    );
    assert!(script.slice(Some(2)).is_err());
    assert_eq!(script.slice(None).unwrap().text, "abcd");
}

#[test]
fn custom_handlers_emit_through_the_facade() {
    struct Stamp;
    impl TagHandler for Stamp {
        fn handle(&mut self, value: Option<&str>, out: &mut Emit<'_>) -> TypeflowResult<()> {
            out.visible_str(value.unwrap_or("?"));
            out.wait(0.1);
            Ok(())
        }
    }
    let mut compiler = Compiler::new(TagConfig::default());
    compiler.register_handler("stamp", Box::new(Stamp)).unwrap();
    assert!(compiler.register_handler("stamp", Box::new(Stamp)).is_err());

    let script = compiler.compile("<stamp=ok>").unwrap();
    assert_eq!(script.buffer(), "ok");
    assert_eq!(
        script.commands(),
        [put(1), put(1), Command::Wait { seconds: 0.1 }]
    );
}

#[test]
fn variables_require_a_resolver() {
    assert!(compile("{name}").is_err());

    struct Fixed;
    impl ResolveVariable for Fixed {
        fn resolve(&mut self, name: &str, out: &mut Emit<'_>) -> TypeflowResult<()> {
            match name {
                "name" => {
                    out.visible_str("Rin");
                    Ok(())
                }
                other => Err(TypeflowError::compile(format!("unknown variable '{other}'"))),
            }
        }
    }
    let mut compiler = Compiler::new(TagConfig::default()).with_variables(Box::new(Fixed));
    let script = compiler.compile("{ name }!").unwrap();
    assert_eq!(script.buffer(), "Rin!");
    assert!(compiler.compile("{other}").is_err());
}

#[test]
fn failed_compiles_never_leak_partial_state() {
    let mut compiler = Compiler::new(TagConfig::default());
    assert!(compiler.compile("ab<bogus>").is_err());
    let script = compiler.compile("ok").unwrap();
    assert_eq!(script.buffer(), "ok");
}

#[test]
fn monospace_measure_skips_markup_runs() {
    let m = MonospaceMeasure { char_width: 2.0 };
    assert_eq!(m.preferred_width("ab"), 4.0);
    assert_eq!(m.preferred_width("<size=50%>ab</size>"), 4.0);
    assert_eq!(m.preferred_width(""), 0.0);
}

#[test]
fn tag_config_round_trips_through_serde() {
    let mut config = TagConfig::default();
    config.through.insert("color".into());
    config.callback.insert("sfx".into());
    let json = serde_json::to_string(&config).unwrap();
    let back: TagConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.through, config.through);
    assert_eq!(back.callback, config.callback);

    let sparse: TagConfig = serde_json::from_str("{}").unwrap();
    assert!(sparse.through.is_empty());
}
